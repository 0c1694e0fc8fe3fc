use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;
use std::env;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub database: Database,
}

// Environment variables overriding the configuration, with the key they override.
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_DATABASE", "database.name"),
    ("LOG_LEVEL", "logger.level"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the process environment is used as is.
        dotenvy::dotenv().ok();

        let config = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        };

        let builder =
            Self::defaults()?.add_source(File::with_name(&format!("config/{config}")).required(false));

        Self::with_overrides(builder, |key| env::var(key).ok())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("logger.level", "info")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 27017_i64)?
            .set_default("database.name", "files_manager")
    }

    fn with_overrides<F>(
        mut builder: ConfigBuilder<DefaultState>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in ENV_OVERRIDES {
            // Blank variables fall back to the defaults, like unset ones.
            let value = lookup(var).filter(|value| !value.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder
            .build()?
            // Deserialize (and thus freeze) the entire configuration.
            .try_deserialize()
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mongodb://{}:{}/{}", self.host, self.port, self.name)
    }
}
