pub mod compose;
pub mod error;
pub mod media;
pub mod publish;
pub mod store;
pub mod wordpress;
