use std::sync::Arc;

use crate::portfolio::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Constructed once at startup and shared read-only by every handler.
    pub store: Arc<dyn PortfolioStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PortfolioStore>) -> Self {
        Self { store }
    }
}
