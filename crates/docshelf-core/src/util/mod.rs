//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: File discovery and reading utilities
//! - [`paths`]: Path expansion and resolution helpers

pub mod files;
pub mod paths;
