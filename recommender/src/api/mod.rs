mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
mod routes;
mod state;

pub use extractors::AppJson;
pub use routes::create_router;
pub use state::AppState;
