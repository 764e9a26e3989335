use std::sync::Arc;

use crate::config::AuthConfig;
use crate::database::Store;

/// Shared by every worker; holds no per-request data
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self { store, auth }
    }
}
