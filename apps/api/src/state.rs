use std::sync::Arc;

use reqwest::Client;

use crate::assessment::manager::AssessmentManager;
use crate::config::Config;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backing structuring, mapping, and the assessment stages.
    pub model: Arc<dyn LanguageModel>,
    /// Client for downloading resumes by URL.
    pub http: Client,
    pub config: Config,
    pub manager: Arc<AssessmentManager>,
}

impl AppState {
    pub fn new(model: Arc<dyn LanguageModel>, http: Client, config: Config) -> Self {
        let manager = Arc::new(AssessmentManager::new(Arc::clone(&model)));
        Self {
            model,
            http,
            config,
            manager,
        }
    }
}
