// src/core/prelude.rs

pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};

pub use std::collections::HashMap;
pub use std::time::{Duration, Instant};

pub use crate::i18n::{get_translation, TranslationError};
