mod app;
mod error;
mod logging;
mod render;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use supplychain_core::redact_database_url;
use supplychain_store::{MemoryStore, PostgresStore, Store};
use tracing::{error, info};
use uuid::Uuid;

use app::{RunPlan, run_session};
use error::CliError;
use logging::{LogOptions, init_logging};
use render::{OutputFormat, Renderer};
use settings::{Settings, load_dotenv, load_settings};

#[derive(Parser, Debug)]
#[command(
    name = "supplychain",
    version,
    about = "Create, seed, and report on the supplier/material/delivery schema"
)]
struct Cli {
    /// Settings file (TOML). Defaults to ./supplychain.toml when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Database connection URL; takes precedence over DATABASE_URL.
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
    /// Postgres schema holding the tables.
    #[arg(long, value_name = "SCHEMA")]
    schema: Option<String>,
    /// Create the tables if they do not exist.
    #[arg(long, default_value_t = false)]
    create_tables: bool,
    /// Insert synthetic suppliers, the material catalog, and deliveries.
    #[arg(long, default_value_t = false)]
    seed: bool,
    /// Seed for the synthetic data streams.
    #[arg(long, value_name = "N")]
    seed_value: Option<u64>,
    /// Number of suppliers to generate.
    #[arg(long, value_name = "N")]
    suppliers: Option<usize>,
    /// Number of deliveries to generate.
    #[arg(long, value_name = "N")]
    deliveries: Option<usize>,
    /// Material listed by the per-material delivery query.
    #[arg(long, value_name = "NAME")]
    material: Option<String>,
    /// Lead time at or below which a delivery counts as fast.
    #[arg(long, value_name = "DAYS")]
    fast_days: Option<i32>,
    /// Run against an in-process store; implies --create-tables and --seed.
    #[arg(long, default_value_t = false, conflicts_with_all = ["database_url", "schema"])]
    in_memory: bool,
    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
    /// Append JSON logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.database_url {
            settings.database_url = Some(url.clone());
        }
        if let Some(schema) = &self.schema {
            settings.schema = Some(schema.clone());
        }
        settings.create_tables |= self.create_tables || self.in_memory;
        settings.seed |= self.seed || self.in_memory;
        if let Some(value) = self.seed_value {
            settings.seed_value = value;
        }
        if let Some(count) = self.suppliers {
            settings.suppliers = count;
        }
        if let Some(count) = self.deliveries {
            settings.deliveries = count;
        }
        if let Some(material) = &self.material {
            settings.selected_material = material.clone();
        }
        if let Some(days) = self.fast_days {
            settings.fast_delivery_days = days;
        }
    }

    fn log_options(&self) -> LogOptions {
        LogOptions {
            json: self.log_json,
            file: self.log_file.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_options()) {
        eprintln!("error: {err}");
        return ExitCode::from(err.exit_code());
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(event = "run_failed", kind = err.kind(), error = %err);
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let started = Instant::now();
    let run_id = Uuid::new_v4();

    load_dotenv()?;
    let mut settings = load_settings(cli.config.as_deref())?;
    settings.apply_env(|key| std::env::var(key).ok());
    cli.apply(&mut settings);
    settings.validate()?;

    let plan = RunPlan {
        create_tables: settings.create_tables,
        seed: settings
            .seed
            .then(|| settings.seed_options(Local::now().date_naive())),
        queries: settings.query_options(),
    };

    let store = open_store(&cli, &settings).await?;
    info!(
        event = "run_started",
        run_id = %run_id,
        engine = store.engine(),
        create_tables = plan.create_tables,
        seed = plan.seed.is_some(),
    );

    let mut renderer = Renderer::new(std::io::stdout(), cli.format);
    run_session(store.as_ref(), &plan, &mut renderer).await?;

    info!(
        event = "run_finished",
        run_id = %run_id,
        status = "success",
        duration_ms = started.elapsed().as_millis() as u64,
    );
    Ok(())
}

async fn open_store(cli: &Cli, settings: &Settings) -> Result<Box<dyn Store>, CliError> {
    if cli.in_memory {
        return Ok(Box::new(MemoryStore::new()));
    }
    let url = settings.database_url()?;
    info!(event = "connecting", url = %redact_database_url(url));
    let store = PostgresStore::connect(url, settings.postgres_options()).await?;
    Ok(Box::new(store))
}
