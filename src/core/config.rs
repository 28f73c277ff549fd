// src/core/config.rs
use crate::core::constants::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_CHUNK_KIB,
    MAX_TIMEOUT_SECS, MAX_UPLOAD_CHUNK_KIB, MIN_TIMEOUT_SECS, MIN_UPLOAD_CHUNK_KIB,
};
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// TOML Configuration Structure
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    general: GeneralConfig,
    language: LanguageConfig,
    #[serde(default)]
    api: Option<ApiConfigToml>,
    #[serde(default)]
    session: Option<SessionConfigToml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguageConfig {
    current: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ApiConfigToml {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
    #[serde(default = "default_upload_chunk")]
    upload_chunk_kib: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct SessionConfigToml {
    #[serde(default)]
    token_file: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_base_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_upload_chunk() -> usize {
    DEFAULT_UPLOAD_CHUNK_KIB
}

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<String>,
    pub log_level: String,
    pub language: String,
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub upload_chunk_kib: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Empty means the default location below the config directory.
    pub token_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_chunk_kib: DEFAULT_UPLOAD_CHUNK_KIB,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_with_messages(true).await
    }

    pub async fn load_with_messages(show_messages: bool) -> Result<Self> {
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(config) => {
                        if show_messages {
                            Self::log_startup(&config);
                        }
                        Self::apply_language(&config);
                        return Ok(config);
                    }
                    Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
                }
            }
        }

        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let config = Self::from_file(&path).await?;

        if show_messages {
            log::info!("New config: {}", path.display());
            Self::log_startup(&config);
        }

        Self::apply_language(&config);
        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(AppError::Io)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.as_ref().to_string_lossy().into_owned());

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        let api = file.api.map_or_else(ApiConfig::default, |a| ApiConfig {
            base_url: a.base_url.trim().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(Self::clamp(
                a.timeout_secs,
                MIN_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
                DEFAULT_TIMEOUT_SECS,
            )),
            upload_chunk_kib: Self::clamp(
                a.upload_chunk_kib as u64,
                MIN_UPLOAD_CHUNK_KIB as u64,
                MAX_UPLOAD_CHUNK_KIB as u64,
                DEFAULT_UPLOAD_CHUNK_KIB as u64,
            ) as usize,
        });

        let session = file
            .session
            .map_or_else(SessionConfig::default, |s| SessionConfig {
                token_file: match s.token_file.trim() {
                    "" => None,
                    path => Some(PathBuf::from(path)),
                },
            });

        Ok(Self {
            config_path: None,
            log_level: file.general.log_level,
            language: file.language.current.to_lowercase(),
            api,
            session,
        })
    }

    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };

        let file = ConfigFile {
            general: GeneralConfig {
                log_level: self.log_level.clone(),
            },
            language: LanguageConfig {
                current: self.language.clone(),
            },
            api: Some(ApiConfigToml {
                base_url: self.api.base_url.clone(),
                timeout_secs: self.api.timeout.as_secs(),
                upload_chunk_kib: self.api.upload_chunk_kib,
            }),
            session: Some(SessionConfigToml {
                token_file: self
                    .session
                    .token_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            }),
        };

        let content = toml::to_string_pretty(&file)
            .map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        if let Some(parent) = PathBuf::from(path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(AppError::Io)?;
        }

        tokio::fs::write(path, content).await.map_err(AppError::Io)
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    fn clamp(value: u64, min: u64, max: u64, default: u64) -> u64 {
        if value < min || value > max {
            default
        } else {
            value
        }
    }

    fn apply_language(config: &Config) {
        if let Err(e) = crate::i18n::set_language(&config.language) {
            log::warn!("Language '{}' not applied: {}", config.language, e);
        }
    }

    fn log_startup(config: &Config) {
        log::info!("Content Admin v{}", crate::core::constants::VERSION);
        log::info!(
            "API: {} (timeout {}s, upload chunk {} KiB)",
            config.api.base_url,
            config.api.timeout.as_secs(),
            config.api.upload_chunk_kib
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            log_level: default_log_level(),
            language: crate::i18n::DEFAULT_LANGUAGE.into(),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = Config::from_toml_str(
            r#"
[general]
log_level = "debug"

[language]
current = "DE"

[api]
base_url = "https://cms.example.com/api/"
timeout_secs = 10
upload_chunk_kib = 128

[session]
token_file = "/tmp/token.toml"
"#,
        )
        .expect("valid config");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.language, "de");
        assert_eq!(config.api.base_url, "https://cms.example.com/api");
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert_eq!(config.api.upload_chunk_kib, 128);
        assert_eq!(
            config.session.token_file,
            Some(PathBuf::from("/tmp/token.toml"))
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml_str(
            "[general]\nlog_level = \"warn\"\n[language]\ncurrent = \"en\"\n",
        )
        .expect("valid config");
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert!(config.session.token_file.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped_to_defaults() {
        let config = Config::from_toml_str(
            r#"
[general]
[language]
current = "en"
[api]
timeout_secs = 0
upload_chunk_kib = 1
"#,
        )
        .expect("valid config");
        assert_eq!(config.api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.api.upload_chunk_kib, DEFAULT_UPLOAD_CHUNK_KIB);
    }

    #[test]
    fn broken_toml_is_a_config_error() {
        let err = Config::from_toml_str("[general").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn save_then_reload_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("admin.toml");
        tokio::fs::write(
            &path,
            "[general]\nlog_level = \"info\"\n[language]\ncurrent = \"en\"\n",
        )
        .await
        .expect("write");

        let mut config = Config::from_file(&path).await.expect("load");
        config.language = "de".into();
        config.save().await.expect("save");

        let reloaded = Config::from_file(&path).await.expect("reload");
        assert_eq!(reloaded.language, "de");
        assert_eq!(reloaded.config_path(), Some(path.to_string_lossy().as_ref()));
    }
}
