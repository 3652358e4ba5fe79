pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod messages;

// Re-export main types for convenience
pub use application::hero_service::HeroService;
pub use application::outcome::Outcome;
pub use application::search_pipeline::SearchPipeline;
pub use config::AppConfig;
pub use domain::hero::{Hero, NewHero};
pub use infrastructure::in_memory_backend::InMemoryBackend;
pub use infrastructure::transport::{Method, Request, Response, Transport, TransportError};
pub use messages::MessageLog;
