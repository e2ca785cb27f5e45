//! CLI library for testing purposes

pub mod config;
pub mod consume;
pub mod generate;
pub mod validation;

pub use config::Config;
