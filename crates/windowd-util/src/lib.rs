//! Shared utilities for windowd
//!
//! This crate provides:
//! - The daily UTC hour window type
//! - Time utilities (UTC wall clock with debug mock time, duration helpers)
//! - Unit name type
//! - Error types
//! - Default paths for the configuration file

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
