use std::str::FromStr;

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/jpg", "image/png"];

pub const MIN_PASSWORD_LEN: usize = 6;

pub const TOAST_TTL_MS: i32 = 4000;
pub const MAX_TOASTS: usize = 5;

/// Backend base URL, overridable at build time with `EXPENSES_API_URL`.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("EXPENSES_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
}

pub fn log_level() -> LevelFilter {
    option_env!("EXPENSES_LOG_LEVEL")
        .and_then(|raw| LevelFilter::from_str(raw).ok())
        .unwrap_or(LevelFilter::Info)
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
