//! Twitter domain - stored tweets, their generated articles, and queries

pub mod models;
pub mod queries;

// Re-export models for convenience
pub use models::*;

// Re-export query modules
pub use queries::tweets;
