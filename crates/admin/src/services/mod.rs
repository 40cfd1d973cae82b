//! Business logic services for admin.
//!
//! # Services
//!
//! - `wholesale` - Validating and saving wholesale policies

pub mod wholesale;

pub use wholesale::{PolicyUpdate, save_policy};
