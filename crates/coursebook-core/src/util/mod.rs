//! Utility modules for identifier handling.
//!
//! # Modules
//!
//! - [`ids`]: Slugs, constant names, and file stems

pub mod ids;
