//! Domain types: language registry, bundle options and errors.

pub mod errors;
pub mod languages;
pub mod model;
