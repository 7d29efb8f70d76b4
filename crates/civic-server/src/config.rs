use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Fill an empty database with demo data on startup.
    pub seed: bool,
    pub admin_ids: HashSet<Uuid>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("CIVIC_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("CIVIC_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CIVIC_PORT '{raw}' is not a port number"))?,
            None => 3000,
        };
        let db_path = lookup("CIVIC_DB_PATH")
            .unwrap_or_else(|| "civic.db".into())
            .into();
        let seed = match lookup("CIVIC_SEED").as_deref().map(str::trim) {
            None | Some("") => true,
            Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(other) => anyhow::bail!("CIVIC_SEED '{other}' is not a boolean"),
        };
        let admin_ids = lookup("CIVIC_ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<Uuid>()
                    .with_context(|| format!("CIVIC_ADMIN_IDS entry '{s}' is not a UUID"))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            host,
            port,
            db_path,
            seed,
            admin_ids,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
