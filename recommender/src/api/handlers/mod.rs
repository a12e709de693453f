pub(crate) mod health;
pub mod recommendation;

pub use health::health_check;
pub use recommendation::recommend;
