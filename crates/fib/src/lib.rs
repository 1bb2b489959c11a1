pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

use infra::logging::Verbosity;

pub fn init(verbosity: Verbosity) {
    infra::logging::init(verbosity);
}
