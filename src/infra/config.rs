//! Centralized configuration (environment variables + defaults).

use anyhow::anyhow;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

/// Connection settings for the relational store (Supabase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: String,
}

/// Allowed cross-origin request origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Document store URL (required).
    pub database_url: String,
    /// Document store database name (required). Collections live in this Postgres schema.
    pub db_name: String,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    /// Raw `CORS_ORIGINS` value, comma-separated.
    pub cors_origins_raw: String,
    pub bind_addr: String,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` is the production caller.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("{} must be set", key))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_name: required("DB_NAME")?,
            supabase_url: lookup("SUPABASE_URL"),
            supabase_service_key: lookup("SUPABASE_SERVICE_KEY"),
            cors_origins_raw: lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }

    /// Relational store settings, only when both URL and key are present.
    pub fn supabase(&self) -> Option<SupabaseSettings> {
        let url = self.supabase_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self
            .supabase_service_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some(SupabaseSettings {
            url: url.to_string(),
            service_key: key.to_string(),
        })
    }

    pub fn cors_origins(&self) -> CorsOrigins {
        let origins: Vec<String> = self
            .cors_origins_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}
