use crate::i18n::TranslationError;
use std::io;

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Config(String),
    Validation(String),
    Network(String),
    Remote {
        status: Option<u16>,
        message: String,
    },
    Auth(String),
    Decode(String),
    Translation(TranslationError),
}

impl AppError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Remote {
            status,
            message: message.into(),
        }
    }

    /// Expired or rejected credential; the session must be cleared.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// Message without the category prefix, for user-facing notices.
    pub fn reason(&self) -> String {
        match self {
            AppError::Io(err) => err.to_string(),
            AppError::Config(msg)
            | AppError::Validation(msg)
            | AppError::Network(msg)
            | AppError::Auth(msg)
            | AppError::Decode(msg) => msg.clone(),
            AppError::Remote { message, .. } => message.clone(),
            AppError::Translation(err) => err.to_string(),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<TranslationError> for AppError {
    fn from(err: TranslationError) -> Self {
        AppError::Translation(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO Error: {}", err),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::Remote {
                status: Some(code),
                message,
            } => write!(f, "Remote Error (HTTP {}): {}", code, message),
            AppError::Remote {
                status: None,
                message,
            } => write!(f, "Remote Error: {}", message),
            AppError::Auth(msg) => write!(f, "Auth Error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            AppError::Translation(err) => write!(f, "Translation Error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_includes_status() {
        let err = AppError::remote(Some(500), "boom");
        assert_eq!(err.to_string(), "Remote Error (HTTP 500): boom");
        assert_eq!(err.reason(), "boom");
    }

    #[test]
    fn only_auth_errors_are_auth() {
        assert!(AppError::Auth("expired".into()).is_auth());
        assert!(!AppError::Network("down".into()).is_auth());
        assert!(!AppError::remote(Some(401), "x").is_auth());
    }
}
