pub mod hero_service;
pub mod outcome;
pub mod search_pipeline;
