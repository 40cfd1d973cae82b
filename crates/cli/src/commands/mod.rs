//! Subcommand implementations.

pub mod policy;
pub mod quote;
