//! Debian version handling
//!
//! - [`debian`]: version parsing and dpkg ordering
//! - [`error`]: version and watermark errors

pub mod debian;
pub mod error;

pub use debian::DebianVersion;
