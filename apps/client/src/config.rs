use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
///
/// Every setting has a default: the core must come up without any
/// environment at all (the common case for an embedded client).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API (auth, profile, jobs).
    pub api_base_url: String,
    /// Base URL of the AI service (extraction, generation, chat).
    pub ai_service_url: String,
    /// Path of the durable state snapshot file.
    pub state_path: String,
    pub rust_log: String,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: env_or("API_BASE_URL", "http://localhost:8080/api"),
            ai_service_url: env_or("AI_SERVICE_URL", "http://localhost:8000"),
            state_path: env_or("STATE_PATH", "neilwe_state.json"),
            rust_log: env_or("RUST_LOG", "info"),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_to_default() {
        assert_eq!(env_or("NEILWE_TEST_UNSET_VAR", "fallback"), "fallback");
    }
}
