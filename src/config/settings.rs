//! Process settings from environment variables (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which `PersonStore` backs the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidSetting {
                name: "STORE",
                reason: format!("{} (expected postgres or memory)", s),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub store: StoreKind,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Schema holding the `person` table. Must be a valid PostgreSQL identifier.
    pub people_schema: String,
    pub bind_addr: SocketAddr,
    pub api_doc_path: Option<PathBuf>,
    pub max_body_bytes: usize,
}

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/people";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or empty values take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match get("STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };
        let bind_addr_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr_raw.parse().map_err(|e| ConfigError::InvalidSetting {
            name: "BIND_ADDR",
            reason: format!("{}: {}", bind_addr_raw, e),
        })?;
        let people_schema = get("PEOPLE_SCHEMA").unwrap_or_else(|| "public".into());
        if !is_identifier(&people_schema) {
            return Err(ConfigError::InvalidSetting {
                name: "PEOPLE_SCHEMA",
                reason: format!("{} is not a plain identifier", people_schema),
            });
        }

        Ok(Settings {
            store,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            db_max_connections: parse_number(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            people_schema,
            bind_addr,
            api_doc_path: get("API_DOC_PATH").map(PathBuf::from),
            max_body_bytes: parse_number(get("MAX_BODY_BYTES"), "MAX_BODY_BYTES", 64 * 1024)?,
        })
    }
}

fn parse_number<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::InvalidSetting {
            name,
            reason: format!("{}: {}", s, e),
        }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
