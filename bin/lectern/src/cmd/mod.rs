//! CLI command implementations.

pub mod check;
pub mod feed;
pub mod new;
pub mod serve;
