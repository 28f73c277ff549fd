pub const APP_TITLE: &str = "CONTENT ADMIN";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_DIR: &str = ".content-admin";
pub const CONFIG_FILE: &str = "admin.toml";
pub const TOKEN_FILE: &str = "session.toml";
pub const API_URL_ENV: &str = "CONTENT_ADMIN_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_UPLOAD_CHUNK_KIB: usize = 64;
pub const MIN_UPLOAD_CHUNK_KIB: usize = 4;
pub const MAX_UPLOAD_CHUNK_KIB: usize = 4096;

pub const PROMPT: &str = "/// ";

pub const SIG_EXIT: &str = "__EXIT__";
