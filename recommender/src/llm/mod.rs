mod api;
mod mock;
pub mod prompts;
mod provider;

pub use api::RuntimeApiClient;
pub use mock::MockTransport;
pub use provider::{LlmBackend, LlmProvider, ModelTransport};
