use std::sync::Arc;
use crate::application::services::ScreeningService;

/// Shared state for the axum handlers. Read-only after startup.
#[derive(Clone)]
pub struct HttpState {
    pub screening: Arc<ScreeningService>,
}
