use std::{env, time::Duration};

use crate::services::auth_service::hash_password;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub admin_email: String,
    /// Argon2 hash of `ADMIN_PASSWORD`; the plaintext is dropped on load.
    pub admin_password_hash: String,
    /// Hosts product images may be served from.
    pub image_domains: Vec<String>,
    pub default_page_size: usize,
    pub simulated_latency: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let admin_password_hash = hash_password(
            &env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        )?;
        let image_domains = parse_domains(&env::var("IMAGE_DOMAINS").unwrap_or_default());
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|p| p.parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(10);
        let simulated_latency = env::var("SIMULATED_LATENCY_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_default();
        Ok(Self {
            host,
            port,
            jwt_secret,
            admin_email,
            admin_password_hash,
            image_domains,
            default_page_size,
            simulated_latency,
        })
    }
}

pub fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
