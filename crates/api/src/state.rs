use std::sync::Arc;

use yieldcast_core::YieldService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and never mutated; cloning only bumps `Arc` counts.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (reported by the system endpoints).
    pub config: Arc<ServerConfig>,
    /// Loaded models plus the schema variant they serve.
    pub service: Arc<YieldService>,
}

impl AppState {
    pub fn new(config: ServerConfig, service: YieldService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }
}
