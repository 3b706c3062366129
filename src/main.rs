//! Command-line interface for rando-search
//!
//! # Usage Examples
//!
//! ```bash
//! # Serve /v0/randos and /v1/randos with the bundled settings
//! rando-search
//!
//! # Apply settings/docker.yaml over settings/defaults.yaml
//! rando-search --env docker
//!
//! # Seed both collections with 10,000 documents each, then exit
//! rando-search -p --populate-count 10000 --batch-size 500
//! ```

use anyhow::Context;
use clap::Parser;
use mongodb::Database;
use rando_core::Variant;
use rando_populate_mongodb::{PopulateArgs, PopulateProgress, RandoPopulator};
use rando_search::config::{Settings, DEFAULT_SETTINGS_PATH};
use rando_search::connect::connect_mongodb;
use rando_search::logging::{init_tracing, mask_connection_password};
use rando_search::provision::ensure_collections;
use rando_search::search::{router, MongoStore, SearchPipeline};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "rando-search")]
#[command(about = "Seed MongoDB with random people and search them over HTTP")]
#[command(long_about = None)]
struct Cli {
    /// Base settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH, env = "RANDO_SETTINGS")]
    settings: PathBuf,

    /// Settings overlay to merge, loaded from `<env>.yaml` next to the base file
    #[arg(long, env = "ENV")]
    env: Option<String>,

    /// HTTP listen address (overrides server.address)
    #[arg(long)]
    address: Option<String>,

    /// Log level (overrides logging.level; RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    #[command(flatten)]
    populate: PopulateArgs,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(address) = &self.address {
            settings.server.address = address.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if self.populate.populate {
            settings.populate.enabled = true;
        }
        if let Some(count) = self.populate.populate_count {
            settings.populate.count = count;
        }
        if let Some(batch_size) = self.populate.batch_size {
            settings.populate.batch_size = batch_size;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings, cli.env.as_deref())
        .with_context(|| format!("Failed to load settings from {:?}", cli.settings))?;
    cli.apply_overrides(&mut settings);
    settings
        .validate()
        .context("Invalid command-line override")?;

    // Initialize tracing
    init_tracing(&settings.logging.level);
    tracing::trace!(
        env = cli.env.as_deref().unwrap_or("default"),
        uri = %mask_connection_password(&settings.mongo_uri()),
        address = %settings.server.address,
        populate = settings.populate.enabled,
        "Settings gathered"
    );

    let client = connect_mongodb(&settings).await?;
    let database = client.database(&settings.data.database);

    ensure_collections(&database, settings.timeout())
        .await
        .context("Failed to provision collections")?;

    if settings.populate.enabled {
        return run_populate(database, &settings).await;
    }

    run_server(database, &settings).await
}

async fn run_populate(database: Database, settings: &Settings) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received interrupt signal (Ctrl+C), stopping after current batch");
                cancel.cancel();
            }
        }
    });

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<PopulateProgress>();
    let reporter = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            tracing::info!(
                "{}: {}/{} ({:.2}%)",
                progress.variant,
                progress.inserted,
                progress.total,
                progress.percent()
            );
        }
    });

    tracing::info!(
        "Populating MongoDB with {} documents per collection (batch size {})",
        settings.populate.count,
        settings.populate.batch_size
    );

    let populator = RandoPopulator::new(database)
        .with_batch_size(settings.populate.batch_size)
        .with_progress(progress_tx);

    for variant in Variant::ALL {
        let metrics = populator
            .populate(variant, settings.populate.count, &cancel)
            .await
            .with_context(|| format!("Failed to populate collection '{variant}'"))?;

        tracing::info!(
            "Populated {}: {} documents in {:?} ({} batches)",
            variant,
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.batch_count
        );
    }

    for variant in Variant::ALL {
        let count = populator
            .document_count(variant)
            .await
            .with_context(|| format!("Failed to count collection '{variant}'"))?;
        tracing::info!(collection = %variant, count, "Estimated collection size");
    }

    // Closing the last sender ends the reporter
    drop(populator);
    reporter.await.context("Progress reporter failed")?;

    Ok(())
}

async fn run_server(database: Database, settings: &Settings) -> anyhow::Result<()> {
    let pipeline = |variant: Variant| {
        SearchPipeline::new(
            variant,
            MongoStore::new(database.collection(variant.collection_name())),
            settings.page_defaults(),
            settings.timeout(),
        )
    };
    let app = router(pipeline(Variant::Base), pipeline(Variant::Custom));

    let listener = tokio::net::TcpListener::bind(&settings.server.address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.address))?;
    tracing::info!("Starting HTTP server on {}", settings.server.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received interrupt signal (Ctrl+C), shutting down"),
        Err(e) => {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
