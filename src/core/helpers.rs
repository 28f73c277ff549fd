use crate::core::prelude::*;
use std::path::PathBuf;

/// Directory next to the executable; all local state lives below it.
pub fn get_base_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(AppError::Io)?;
    exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| AppError::Config("Executable has no parent directory".to_string()))
}

/// Char-boundary safe preview for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!(
            "{}...",
            text.chars()
                .take(max_chars.saturating_sub(3))
                .collect::<String>()
        )
    } else {
        text.to_string()
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
