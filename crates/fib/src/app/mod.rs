//! Application layer orchestrating domain logic and infrastructure.

pub mod bundle;
pub mod compose;
pub mod export;
pub mod filter;
pub mod rsp;
pub mod scan;
pub mod sort;
