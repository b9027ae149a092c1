/// API key configuration
///
/// The key lives in the process environment under GEMINI_API_KEY, loaded
/// from a `.env` file during development. The generation service reads
/// it through `api_key()` at call time rather than caching it, so a key
/// re-selected through the access gate takes effect on the next request.

use std::env;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Load `.env` (if present) into the process environment.
/// Called once at startup, before the access gate runs.
pub fn load() {
    if dotenvy::dotenv().is_ok() {
        println!("📄 Loaded environment from .env");
    }
}

/// The currently configured API key, if any.
/// Whitespace-only values count as absent.
pub fn api_key() -> Option<String> {
    match env::var(API_KEY_VAR) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Replace the configured key, e.g. after the user picked a key file
pub fn set_api_key(key: &str) {
    env::set_var(API_KEY_VAR, key);
}
