// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Number of entries returned by leaderboard queries when no limit is given.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Time allowed for one sitting, handed to the client-side timer.
pub const EXAM_DURATION_SECONDS: u64 = 3600;

/// Prefix of the access link assigned on activation.
pub const LINK_PREFIX: &str = "exam/";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub port: u16,
    pub log_dir: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let admin_username = env::var("ADMIN_USERNAME").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        let seed_sample_data = env::var("SEED_SAMPLE_DATA")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            rust_log,
            port,
            log_dir,
            admin_username,
            admin_password,
            seed_sample_data,
        }
    }

    /// Placeholder admin check against the configured credentials.
    /// Always fails when either credential is unset.
    pub fn authenticate_admin(&self, username: &str, password: &str) -> bool {
        match (&self.admin_username, &self.admin_password) {
            (Some(u), Some(p)) => u == username && p == password,
            _ => false,
        }
    }
}
