use std::sync::Arc;

use crate::{
    config::Config,
    services::{CollectionSource, DiscogsClient},
};

/// Shared application state
///
/// Immutable after startup; every comparison keeps its own data on the stack.
pub struct AppState {
    /// Used by the pass-through proxy route
    pub discogs: DiscogsClient,
    /// Used by the collection walker behind comparisons
    pub collections: Arc<dyn CollectionSource>,
    pub page_size: u32,
}

impl AppState {
    /// Builds state talking to Discogs for both proxying and comparisons
    pub fn new(config: &Config) -> Self {
        let discogs = DiscogsClient::from_config(config);
        Self {
            collections: Arc::new(discogs.clone()),
            discogs,
            page_size: config.collection_page_size,
        }
    }
}
