use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmProvider;
use crate::recommendation::Recommender;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
    /// `None` while no model id is configured; the route then reports a
    /// configuration error instead of calling the backend.
    pub recommender: Option<Recommender>,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider) -> Self {
        let recommender = llm
            .model_id()
            .map(|model_id| Recommender::new(llm.transport(), model_id));

        Self {
            config: Arc::new(config),
            llm,
            recommender,
        }
    }
}
