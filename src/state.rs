use crate::config::Config;
use crate::error::Result;
use crate::ingestion::{load_catalog, Catalog, CatalogOptions};
use crate::relevance::{PredicateBuilder, QueryEngine, SynonymTable};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Application state shared across all request handlers.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub engine: Arc<QueryEngine>,
    pub semaphore: Arc<Semaphore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the engine and load the catalog named by the configuration.
    ///
    /// Without `catalog_path` the service starts with an empty catalog and
    /// reports not-ready.
    pub fn new(config: Config) -> Result<Self> {
        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTable::from_json_file(path)?,
            None => SynonymTable::builtin().clone(),
        };

        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(
                path,
                &CatalogOptions {
                    infer_categories: config.infer_categories,
                },
            )?,
            None => {
                tracing::warn!("CATALOG_PATH not set, serving an empty catalog");
                Catalog::default()
            }
        };

        Self::with_catalog(config, synonyms, catalog)
    }

    /// Assemble state from an already loaded catalog.
    pub fn with_catalog(config: Config, synonyms: SynonymTable, catalog: Catalog) -> Result<Self> {
        let predicates = PredicateBuilder::new(config.predicate_columns.clone())?;
        let engine = QueryEngine::new(synonyms, predicates);

        let permits = config.search_permits.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        });

        tracing::info!(
            permits,
            tools = catalog.len(),
            synonyms = engine.synonyms().len(),
            "Search state initialized"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
            semaphore: Arc::new(Semaphore::new(permits)),
            config: Arc::new(config),
        })
    }

    /// Ready once a non-empty catalog is loaded. The catalog never changes
    /// after startup.
    pub fn is_ready(&self) -> bool {
        !self.catalog.is_empty()
    }
}
