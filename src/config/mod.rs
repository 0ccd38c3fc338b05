// src/config/mod.rs
// All tunables load from the environment (.env supported), with sensible defaults.

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WellspringConfig {
    // ── Model Provider Configuration
    pub openai_base_url: String,
    pub chat_model: String,
    pub summary_model: String,
    pub chat_temperature: f32,
    pub summary_temperature: f32,

    // ── Request Handling
    /// Hard upper bound on one upstream model call. On expiry the call is
    /// surfaced as a retryable timeout, never left hanging.
    pub request_timeout_secs: u64,

    // ── Safety Replies
    /// Regional helpline sentence injected into the fixed crisis reply.
    pub crisis_line: String,

    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl WellspringConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            chat_model: env_var_or("WELLSPRING_CHAT_MODEL", "gpt-4o-mini".to_string()),
            summary_model: env_var_or("WELLSPRING_SUMMARY_MODEL", "gpt-4o".to_string()),
            chat_temperature: env_var_or("WELLSPRING_CHAT_TEMPERATURE", 0.4),
            summary_temperature: env_var_or("WELLSPRING_SUMMARY_TEMPERATURE", 0.2),
            request_timeout_secs: env_var_or("WELLSPRING_REQUEST_TIMEOUT_SECS", 25),
            crisis_line: env_var_or(
                "WELLSPRING_CRISIS_LINE",
                "In Australia, you can contact Lifeline on 13 11 14".to_string(),
            ),
            host: env_var_or("WELLSPRING_HOST", "0.0.0.0".to_string()),
            port: env_var_or("WELLSPRING_PORT", 3001),
            cors_origin: env_var_or("WELLSPRING_CORS_ORIGIN", "http://localhost:3000".to_string()),
            log_level: env_var_or("WELLSPRING_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods ---

    /// Full provider URL for a given endpoint
    pub fn openai_api_url(&self, endpoint: &str) -> String {
        format!("{}/v1/{}", self.openai_base_url, endpoint)
    }

    /// Server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound on one upstream model call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<WellspringConfig> = Lazy::new(WellspringConfig::from_env);
