//! 共享应用状态

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::display::LinkBuilder;
use crate::services::factor::FactorCatalog;
use crate::services::query_cache::QueryCache;
use crate::services::screener::Screener;
use crate::services::upstream::FilterBackend;

pub struct AppState {
    pub screener: Screener,
    pub catalog: FactorCatalog,
    pub links: LinkBuilder,
}

impl AppState {
    pub fn new(config: &AppConfig, backend: Arc<dyn FilterBackend>) -> Self {
        Self {
            screener: Screener::new(backend, QueryCache::from_config(&config.cache)),
            catalog: FactorCatalog::builtin(),
            links: LinkBuilder::new(&config.links),
        }
    }
}
