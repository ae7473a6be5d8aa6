use std::sync::Arc;

use crate::analysis::service::AnalysisSettings;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Upstream model. `GeminiClient` in production, stubs in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub settings: Arc<AnalysisSettings>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: AnalysisSettings) -> Self {
        Self {
            generator,
            settings: Arc::new(settings),
        }
    }
}
