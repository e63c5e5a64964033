//! Server Configuration
//!
//! Everything is read from environment variables once at startup
//! (`.env` is loaded first by `main`).

use std::net::SocketAddr;

use account::application::config::DEFAULT_MAX_LOGIN_ATTEMPTS;
use account::{AccountConfig, SmtpConfig};
use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose;
use platform::object_store::S3Config;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const MIN_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub account: AccountConfig,
    pub s3: S3Config,
    /// `None` when `SMTP_HOST` is unset; verification links are then only logged
    pub smtp: Option<SmtpConfig>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `development` relaxes the password policy and allows a random token secret
    pub fn from_lookup<F>(get: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut account = if development {
            AccountConfig::development()
        } else {
            AccountConfig::default()
        };

        match get("TOKEN_SECRET") {
            Some(secret_b64) => {
                let secret = general_purpose::STANDARD
                    .decode(secret_b64.trim())
                    .context("TOKEN_SECRET must be base64")?;
                if secret.len() < MIN_TOKEN_SECRET_BYTES {
                    bail!("TOKEN_SECRET must decode to at least {MIN_TOKEN_SECRET_BYTES} bytes");
                }
                account.token_secret = secret;
            }
            None if development => {
                tracing::warn!("TOKEN_SECRET not set; using a random secret for this process");
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        }

        if let Some(pepper_b64) = get("PASSWORD_PEPPER") {
            account.password_pepper = Some(
                general_purpose::STANDARD
                    .decode(pepper_b64.trim())
                    .context("PASSWORD_PEPPER must be base64")?,
            );
        }

        if let Some(minutes) = get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            let minutes: i64 = minutes
                .parse()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?;
            account.token_ttl = chrono::Duration::minutes(minutes);
        }

        account.max_login_attempts = match get("MAX_LOGIN_ATTEMPTS") {
            Some(value) => value
                .parse()
                .context("MAX_LOGIN_ATTEMPTS must be a positive integer")?,
            None => DEFAULT_MAX_LOGIN_ATTEMPTS,
        };
        if account.max_login_attempts == 0 {
            bail!("MAX_LOGIN_ATTEMPTS must be at least 1");
        }

        if let Some(base_url) = get("PUBLIC_BASE_URL") {
            account.public_base_url = base_url;
        }
        if let Some(bucket) = get("MINIO_BUCKET_NAME") {
            account.picture.bucket = bucket;
        }

        let s3 = S3Config {
            endpoint: get("MINIO_ENDPOINT").unwrap_or_else(|| "http://localhost:9000".to_string()),
            region: get("MINIO_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key: get("MINIO_ACCESS_KEY").context("MINIO_ACCESS_KEY must be set")?,
            secret_key: get("MINIO_SECRET_KEY").context("MINIO_SECRET_KEY must be set")?,
            public_endpoint: get("MINIO_PUBLIC_ENDPOINT"),
        };

        let smtp = match get("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: match get("SMTP_PORT") {
                    Some(port) => port.parse().context("SMTP_PORT must be a port number")?,
                    None => 587,
                },
                username: get("SMTP_USERNAME"),
                password: get("SMTP_PASSWORD"),
                from: get("SMTP_FROM").context("SMTP_FROM must be set when SMTP_HOST is")?,
                tls: get("SMTP_TLS").is_none_or(|v| v != "false" && v != "0"),
            }),
            None => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            account,
            s3,
            smtp,
        })
    }
}
