//! Shared application state for all routes.

use crate::config::ResolvedApi;
use crate::store::PersonStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
    pub api: Arc<ResolvedApi>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>, api: ResolvedApi) -> Self {
        AppState {
            store,
            api: Arc::new(api),
        }
    }
}
