pub mod settings;
pub mod twitter;
