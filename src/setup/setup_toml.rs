// =====================================================
// FILE: src/setup/setup_toml.rs
// =====================================================

use crate::core::constants::{CONFIG_DIR, CONFIG_FILE};
use crate::core::helpers::get_base_dir;
use crate::core::prelude::*;
use std::path::PathBuf;
use tokio::fs;

const DEFAULT_CONFIG: &str = r#"[general]
# error | warn | info | debug | trace (RUST_LOG overrides)
log_level = "info"

[language]
# Language of notices and messages: "de" or "en"
current = "en"

[api]
# Base URL of the content store; CONTENT_ADMIN_API_URL overrides it
base_url = "http://localhost:5000/api"
# Per-request timeout in seconds (1-600)
timeout_secs = 30
# Upload progress granularity in KiB (4-4096)
upload_chunk_kib = 64

[session]
# Bearer token file; empty = .content-admin/session.toml next to the binary
token_file = ""
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let config_dir = get_base_dir()?.join(CONFIG_DIR);
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .map_err(AppError::Io)?;
        log::debug!(
            "{}",
            get_translation(
                "system.config.dir_created",
                &[&config_dir.display().to_string()]
            )
        );
    }

    let config_path = config_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)
            .await
            .map_err(AppError::Io)?;

        log::info!(
            "{}",
            get_translation(
                "system.config.file_created",
                &[&config_path.display().to_string()]
            )
        );
    }

    Ok(config_path)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(base_dir) = get_base_dir() {
        paths.push(base_dir.join(CONFIG_DIR).join(CONFIG_FILE));
        paths.push(base_dir.join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::from_toml_str(DEFAULT_CONFIG).expect("default config must parse");
        assert_eq!(config.language, "en");
        assert_eq!(config.api.upload_chunk_kib, 64);
        assert!(config.session.token_file.is_none());
    }

    #[test]
    fn config_paths_end_with_working_dir_fallback() {
        let paths = get_config_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE)));
    }
}
