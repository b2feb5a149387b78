//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub stripe_secret_key: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let mongodb_uri = env::var("MONGODB_URI")
            .map_err(|_| anyhow::anyhow!("MONGODB_URI environment variable is required"))?;

        let database_name =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| "profast".to_string());

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY environment variable is required"))?;

        Ok(Self {
            port,
            mongodb_uri,
            database_name,
            stripe_secret_key,
        })
    }
}
