use crate::core::constants::{CONFIG_DIR, TOKEN_FILE};
use crate::core::helpers::get_base_dir;
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    token: String,
    #[serde(default)]
    saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Durable home of the bearer token between runs.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Uses `session.token_file` when configured, else `.content-admin/session.toml`
    /// next to the executable.
    pub fn new(config: &Config) -> Result<Self> {
        let path = match &config.session.token_file {
            Some(path) => path.clone(),
            None => get_base_dir()?.join(CONFIG_DIR).join(TOKEN_FILE),
        };
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(AppError::Io)?;
        let file = toml::from_str::<TokenFile>(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse session file: {}", e)))?;
        let token = file.token.trim().to_string();
        Ok((!token.is_empty()).then_some(token))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(AppError::Io)?;
        }
        let file = TokenFile {
            token: token.to_string(),
            saved_at: Some(chrono::Utc::now()),
        };
        let serialized = toml::to_string_pretty(&file)
            .map_err(|e| AppError::Config(format!("Failed to serialize session file: {}", e)))?;
        std::fs::write(&self.path, serialized).map_err(AppError::Io)
    }

    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
