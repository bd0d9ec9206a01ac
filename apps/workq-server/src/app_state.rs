use std::sync::Arc;

use workq_core::Registry;

/// Shared state handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
