use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::ml::kmeans::KMeansConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub frontend_dir: PathBuf,
    /// Absent key disables the recruitment endpoint only.
    pub google_api_key: Option<String>,
    pub num_clusters: usize,
    pub kmeans_seed: u64,
    pub kmeans_n_init: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            frontend_dir: PathBuf::from(env_or("FRONTEND_DIR", "frontend")),
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            num_clusters: parse_env("NUM_CLUSTERS", 5)?,
            kmeans_seed: parse_env("KMEANS_SEED", 42)?,
            kmeans_n_init: parse_env("KMEANS_N_INIT", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn kmeans(&self) -> KMeansConfig {
        KMeansConfig {
            k: self.num_clusters,
            n_init: self.kmeans_n_init,
            seed: self.kmeans_seed,
            ..KMeansConfig::default()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
