use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::adapter::output::DietaryDataPaths;
use crate::domain::ResultLimits;

/// Configuration for the nutrition advisor server
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Source data locations
    pub data: DataConfig,

    /// Embedding configuration
    pub embedding: EmbeddingConfig,

    /// Lookup tool bounds and nutrient caps
    pub lookup: LookupConfig,
}

/// Server configuration
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

/// Source data configuration
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON exports
    pub directory: PathBuf,

    /// USDA FoodData Central foundation foods export
    pub foods_file: String,

    pub minerals_file: String,
    pub vitamins_file: String,
    pub nutrition_file: String,

    /// Clear and rebuild the indexes on startup
    pub reindex: bool,
}

impl DataConfig {
    pub fn foods_path(&self) -> PathBuf {
        self.directory.join(&self.foods_file)
    }

    pub fn dietary_paths(&self) -> DietaryDataPaths {
        DietaryDataPaths {
            minerals: self.directory.join(&self.minerals_file),
            vitamins: self.directory.join(&self.vitamins_file),
            nutrition: self.directory.join(&self.nutrition_file),
        }
    }
}

/// Embedding configuration
#[derive(Debug, Deserialize)]
pub struct EmbeddingConfig {
    /// Dimension of embeddings to use
    pub dimension: usize,
}

/// Lookup configuration
#[derive(Debug, Deserialize)]
pub struct LookupConfig {
    pub nutrition_default_results: usize,
    pub nutrition_max_results: usize,
    pub dietary_default_results: usize,
    pub dietary_max_results: usize,

    /// Non-priority nutrients allowed into an indexed document
    pub document_nutrient_cap: usize,

    /// Nutrients shown per food in a chat response
    pub display_nutrient_cap: usize,
}

impl LookupConfig {
    pub fn nutrition_limits(&self) -> ResultLimits {
        ResultLimits {
            default: self.nutrition_default_results,
            max: self.nutrition_max_results,
        }
    }

    pub fn dietary_limits(&self) -> ResultLimits {
        ResultLimits {
            default: self.dietary_default_results,
            max: self.dietary_max_results,
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default.toml` and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config/default.toml"))
    }

    /// Load configuration from the given file (optional) and environment variables
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let nutrition = ResultLimits::NUTRITION;
        let dietary = ResultLimits::DIETARY;

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("data.directory", "data")?
            .set_default("data.foods_file", "foundation_foods.json")?
            .set_default("data.minerals_file", "minerals.json")?
            .set_default("data.vitamins_file", "vitamins.json")?
            .set_default("data.nutrition_file", "nutrition.json")?
            .set_default("data.reindex", false)?
            .set_default("embedding.dimension", 384)?
            .set_default("lookup.nutrition_default_results", nutrition.default as u64)?
            .set_default("lookup.nutrition_max_results", nutrition.max as u64)?
            .set_default("lookup.dietary_default_results", dietary.default as u64)?
            .set_default("lookup.dietary_max_results", dietary.max as u64)?
            .set_default("lookup.document_nutrient_cap", 15)?
            .set_default("lookup.display_nutrient_cap", 8)?
            // Load from config file if it exists
            .add_source(File::from(path).required(false))
            // Override with environment variables (e.g., NUTRITION_SERVER__PORT=8080)
            .add_source(Environment::with_prefix("NUTRITION").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
