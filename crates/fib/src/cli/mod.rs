//! Command-line surface: argument definitions, response files, and handlers.

pub mod args;
pub mod commands;
pub mod response;

pub use args::{Cli, Commands};
pub use commands::run;
pub use response::{ExpandedArgs, expand_args};
