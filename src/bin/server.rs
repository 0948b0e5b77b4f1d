use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use nutrition_advisor::adapter::in_adapters::api::{create_router, AppState};
use nutrition_advisor::adapter::out_adapters::{
    load_dietary_datasets, load_food_records, InMemoryVectorIndex, JsonFoodStore,
    JsonRequirementsStore, SimpleEmbeddingService,
};
use nutrition_advisor::application::{
    DietaryRequirementsService, IndexingService, NutritionLookupService,
};
use nutrition_advisor::config::AppConfig;
use nutrition_advisor::domain::DietaryDatasets;
use nutrition_advisor::ports::in_ports::IndexingPort;

/// Command line arguments for the nutrition advisor server
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[clap(short, long, default_value = "config/default.toml")]
    config: String,

    /// Clear and rebuild both indexes before serving
    #[clap(long)]
    reindex: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let config = match AppConfig::load_from(Path::new(&cli.config)) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {}", err);
            return Err(err).context(format!("invalid configuration in {}", cli.config));
        }
    };
    let reindex = cli.reindex || config.data.reindex;

    info!("Initializing nutrition advisor components...");

    // Initialize adapters
    let embedding_service = Arc::new(SimpleEmbeddingService::new(config.embedding.dimension));
    let food_index = Arc::new(InMemoryVectorIndex::new(embedding_service.clone()));
    let dietary_index = Arc::new(InMemoryVectorIndex::new(embedding_service.clone()));

    let foods_path = config.data.foods_path();
    let food_store = if foods_path.exists() {
        JsonFoodStore::new(&foods_path)
    } else {
        JsonFoodStore::from_records(Vec::new())
    };

    let dietary_paths = config.data.dietary_paths();
    let requirements_store = if dietary_paths.all_exist() {
        JsonRequirementsStore::new(dietary_paths.clone())
    } else {
        JsonRequirementsStore::from_datasets(DietaryDatasets::default())
    };

    // Initialize application services
    let indexing = Arc::new(IndexingService::new(
        food_index.clone(),
        dietary_index.clone(),
        config.lookup.document_nutrient_cap,
    ));

    let nutrition_lookup = Arc::new(NutritionLookupService::new(
        food_index.clone(),
        Arc::new(food_store),
        config.lookup.nutrition_limits(),
        config.lookup.document_nutrient_cap,
        config.lookup.display_nutrient_cap,
    ));

    let dietary_requirements = Arc::new(DietaryRequirementsService::new(
        dietary_index.clone(),
        Arc::new(requirements_store),
        config.lookup.dietary_limits(),
    ));

    // Load the source data into the indexes
    if foods_path.exists() {
        let records = load_food_records(&foods_path)
            .await
            .with_context(|| format!("failed to read {}", foods_path.display()))?;
        let report = indexing.index_foods(&records, reindex).await?;
        info!(
            "Food index: {} indexed, {} total{}",
            report.indexed,
            report.total,
            if report.skipped { " (existing data kept)" } else { "" }
        );
    } else {
        warn!(
            "Food data not found at {}, skipping food indexing",
            foods_path.display()
        );
    }

    if dietary_paths.all_exist() {
        let datasets = load_dietary_datasets(&dietary_paths)
            .await
            .context("failed to read the dietary reference tables")?;
        let report = indexing.index_dietary(&datasets, reindex).await?;
        info!(
            "Dietary index: {} indexed, {} total{}",
            report.indexed,
            report.total,
            if report.skipped { " (existing data kept)" } else { "" }
        );
    } else {
        warn!(
            "Dietary tables not found under {}, skipping dietary indexing",
            config.data.directory.display()
        );
    }

    let stats = indexing.stats().await?;
    info!(
        "Indexing complete: {} food document(s), {} dietary document(s)",
        stats.foods, stats.dietary
    );

    // Initialize the REST API
    let app_state = AppState {
        nutrition_lookup,
        dietary_requirements,
        indexing,
    };

    let app = create_router(app_state);

    let host = config
        .server
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("invalid server host '{}'", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    info!("Starting nutrition advisor server at {}", addr);
    axum::serve(TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
