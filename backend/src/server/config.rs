//! Environment-driven server configuration.
//!
//! All settings are resolved once at startup. Secrets are never logged raw;
//! a short SHA-256 fingerprint is exposed for log correlation instead.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_PAYMENT_API_BASE_URL: &str = "https://api.stripe.com/";

/// Errors raised while resolving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },
    /// A variable is present but unparsable.
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
    /// The session key could not be loaded.
    #[error("failed to load session key: {message}")]
    SessionKey { message: String },
}

/// Card processor connection settings.
#[derive(Clone)]
pub struct PaymentConfig {
    /// Processor API base URL.
    pub base_url: Url,
    /// Bearer secret key for create-intent calls.
    pub secret_key: String,
}

impl PaymentConfig {
    /// Short fingerprint of the secret key for log correlation.
    pub fn secret_fingerprint(&self) -> String {
        secret_fingerprint(self.secret_key.as_bytes())
    }
}

/// Resolved server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether session cookies carry the `Secure` flag.
    pub cookie_secure: bool,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Session cookie signing/encryption key.
    pub session_key: Key,
    /// Card processor settings.
    pub payment: PaymentConfig,
}

impl ServerConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("HACKHUB_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                name: "HACKHUB_BIND_ADDR",
                message: err.to_string(),
            })?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar {
            name: "DATABASE_URL",
        })?;

        let session_key = load_session_key()?;
        let cookie_secure = cookie_secure_from(env::var("SESSION_COOKIE_SECURE").ok().as_deref());

        let base_url = env::var("PAYMENT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PAYMENT_API_BASE_URL.to_owned());
        let base_url = Url::parse(&base_url).map_err(|err| ConfigError::Invalid {
            name: "PAYMENT_API_BASE_URL",
            message: err.to_string(),
        })?;
        let secret_key = env::var("PAYMENT_SECRET_KEY").map_err(|_| ConfigError::MissingVar {
            name: "PAYMENT_SECRET_KEY",
        })?;

        Ok(Self {
            bind_addr,
            cookie_secure,
            database_url,
            session_key,
            payment: PaymentConfig {
                base_url,
                secret_key,
            },
        })
    }
}

/// Interpret the `SESSION_COOKIE_SECURE` value; anything but `0` is secure.
fn cookie_secure_from(raw: Option<&str>) -> bool {
    raw.map(|value| value != "0").unwrap_or(true)
}

fn load_session_key() -> Result<Key, ConfigError> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_SESSION_KEY_FILE.to_owned());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(ConfigError::SessionKey {
                    message: format!("failed to read session key at {key_path}: {err}"),
                })
            }
        }
    }
}

/// First 16 hex characters of a SHA-256 digest, for log correlation.
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    let mut fingerprint = hex::encode(digest);
    fingerprint.truncate(16);
    fingerprint
}
