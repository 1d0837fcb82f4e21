use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use supplychain_core::{DEFAULT_FAST_DELIVERY_DAYS, DEFAULT_SELECTED_MATERIAL};
use supplychain_generate::SeedOptions;
use supplychain_store::{PostgresOptions, QueryOptions};

use crate::error::CliError;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "supplychain.toml";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database_url: Option<String>,
    pub schema: Option<String>,
    pub create_tables: bool,
    pub seed: bool,
    pub seed_value: u64,
    pub suppliers: usize,
    pub deliveries: usize,
    pub selected_material: String,
    pub fast_delivery_days: i32,
    pub acquire_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let seed = SeedOptions::default();
        Self {
            database_url: None,
            schema: None,
            create_tables: false,
            seed: false,
            seed_value: seed.seed,
            suppliers: seed.suppliers,
            deliveries: seed.deliveries,
            selected_material: DEFAULT_SELECTED_MATERIAL.to_string(),
            fast_delivery_days: DEFAULT_FAST_DELIVERY_DAYS,
            acquire_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Overlay values from the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.database_url = Some(url);
        }
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.fast_delivery_days < 1 {
            return Err(CliError::Config(format!(
                "fast_delivery_days must be at least 1, got {}",
                self.fast_delivery_days
            )));
        }
        if self.selected_material.trim().is_empty() {
            return Err(CliError::Config(
                "selected_material must not be empty".to_string(),
            ));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(CliError::Config(
                "acquire_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn database_url(&self) -> Result<&str, CliError> {
        self.database_url.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "no database URL; set {DATABASE_URL_ENV}, pass --database-url, or use --in-memory"
            ))
        })
    }

    pub fn seed_options(&self, today: NaiveDate) -> SeedOptions {
        SeedOptions {
            seed: self.seed_value,
            suppliers: self.suppliers,
            deliveries: self.deliveries,
            today,
            ..SeedOptions::default()
        }
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            fast_delivery_days: self.fast_delivery_days,
            selected_material: self.selected_material.clone(),
        }
    }

    pub fn postgres_options(&self) -> PostgresOptions {
        PostgresOptions {
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
            schema: self.schema.clone(),
        }
    }
}

/// Load `.env` into the process environment. A missing file is fine; an
/// unreadable or malformed one is a configuration error.
pub fn load_dotenv() -> Result<(), CliError> {
    dotenv_outcome(dotenvy::dotenv().map(|_| ()))
}

fn dotenv_outcome(result: Result<(), dotenvy::Error>) -> Result<(), CliError> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(CliError::Config(format!(".env: {err}"))),
    }
}

/// Read settings from `explicit`, or from [`DEFAULT_SETTINGS_FILE`] when it
/// exists, or fall back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !candidate.exists() {
                return Ok(Settings::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|err| {
        CliError::Config(format!("failed to read {}: {err}", path.display()))
    })?;
    parse_settings(&content)
        .map_err(|err| CliError::Config(format!("{}: {err}", path.display())))
}

pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}
