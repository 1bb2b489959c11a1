//! Infrastructure adapters for config, logging, and terminal prompts.

pub mod config;
pub mod logging;
pub mod prompt;
