pub mod config;
pub mod runner;
pub mod transfer;

pub const VERSION: Option<&str> = option_env!("STRATUS_VERSION");
