//! Shared handler state.

use std::sync::Arc;

use disco_db::DiscoService;

/// Cloned into every handler; the service (and its single libSQL
/// connection) is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    service: Arc<DiscoService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: DiscoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn service(&self) -> &DiscoService {
        &self.service
    }
}
