//! Watches Debian package repositories for packages that moved past a recorded version.
//!
//! Each run fetches the configured `Packages` indices, compares the published
//! versions against the stored watermarks, reports the advances and writes the
//! raised watermarks back to the configuration file.

pub mod config;
pub mod error;
pub mod index;
pub mod monitor;
pub mod notify;
pub mod run;
pub mod version;
pub mod watermark;
