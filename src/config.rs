use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Server-side secret appended to every password before hashing.
    pub pepper: String,
    /// Argon2 time cost (number of passes).
    pub rounds: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        let ttl_hours = lookup("JWT_TTL_HOURS")
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(24);

        let pepper = lookup("PASSWORD_PEPPER").unwrap_or_default();
        let rounds = match lookup("PASSWORD_HASH_ROUNDS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("PASSWORD_HASH_ROUNDS is not a number: {raw}"))?,
            None => 2,
        };

        Ok(Self {
            database_url,
            host,
            port,
            jwt: JwtConfig { secret, ttl_hours },
            password: PasswordConfig { pepper, rounds },
        })
    }
}
