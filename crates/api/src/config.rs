use anyhow::{Context, Result};
use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Process-level settings read from the environment at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub skip_migrations: bool,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub introspection: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("PORT must be a valid port number")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            skip_migrations: env_flag("SKIP_MIGRATIONS"),
            port,
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
            ),
            introspection: env_flag("GQL_INTROSPECTION"),
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
