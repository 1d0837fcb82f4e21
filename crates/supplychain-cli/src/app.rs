use std::io::Write;

use supplychain_generate::{SeedGenerator, SeedOptions, seed_store};
use supplychain_store::{QueryOptions, Store, run_query_set};
use tracing::info;

use crate::error::CliError;
use crate::render::Renderer;

/// What a single run does, in order.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub create_tables: bool,
    pub seed: Option<SeedOptions>,
    pub queries: QueryOptions,
}

/// Run `plan` against `store`, then close the session whatever the outcome.
pub async fn run_session<W: Write>(
    store: &dyn Store,
    plan: &RunPlan,
    renderer: &mut Renderer<W>,
) -> Result<(), CliError> {
    let outcome = execute(store, plan, renderer).await;
    store.close().await;
    outcome
}

async fn execute<W: Write>(
    store: &dyn Store,
    plan: &RunPlan,
    renderer: &mut Renderer<W>,
) -> Result<(), CliError> {
    if plan.create_tables {
        store.create_tables().await?;
        info!(event = "tables_ready", engine = store.engine());
        renderer.tables_created()?;
    }

    if let Some(options) = &plan.seed {
        let generator = SeedGenerator::new(options.clone())?;
        let report = seed_store(store, &generator).await?;
        renderer.seeded(&report)?;
    }

    let report = run_query_set(store, &plan.queries).await?;
    renderer.report(&report)
}
