//! HTTP boundary for the climate lookup service.
//!
//! Maps path segments onto [`climate_data::LookupService`] calls and turns
//! lookup diagnostics into `{"error": ..., "available_<items>": [...]}` bodies.

pub mod handlers;
pub mod openapi;
pub mod response;
pub mod router;
pub mod segments;

use climate_data::LookupService;

pub use router::build_router;

/// Shared router state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }
}
