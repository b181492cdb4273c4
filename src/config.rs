use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// Defaults
// =============================================================================

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Timeout for establishing a connection (including TLS handshake) in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Timeout for a whole index request in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode config {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to encode config: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level configuration document
///
/// Key names follow the PascalCase layout existing configuration files use.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default, rename = "HTTP", skip_serializing_if = "is_default")]
    pub http: HttpConfig,
    #[serde(default)]
    pub repo: Vec<RepositoryConfig>,
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct EmailConfig {
    pub header: HeaderConfig,
    #[serde(rename = "SMTP")]
    pub smtp: SmtpConfig,
}

/// Message headers shared by every outgoing notification
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct HeaderConfig {
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub to: Vec<String>,
}

/// SMTP submission endpoint and credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct SmtpConfig {
    pub address: String,
    pub password: String,
    pub port: u16,
    pub server: String,
    #[serde(skip_serializing_if = "is_default")]
    pub security: SmtpSecurity,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            password: String::new(),
            port: DEFAULT_SMTP_PORT,
            server: String::new(),
            security: SmtpSecurity::default(),
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS
    #[default]
    Starttls,
    /// Implicit TLS from the first byte
    Tls,
    /// No encryption
    None,
}

/// HTTP client settings for index fetches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct HttpConfig {
    /// Connect and TLS handshake timeout in seconds
    pub connect_timeout: u64,
    /// Overall request timeout in seconds
    pub timeout: u64,
    /// Accept self-signed or otherwise unverifiable certificates
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            accept_invalid_certs: false,
        }
    }
}

/// One tracked repository
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryConfig {
    pub name: String,
    #[serde(default, rename = "URL")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub packages: Vec<TrackedPackage>,
}

/// A package and the highest version already reported for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TrackedPackage {
    pub name: String,
    /// Empty when the entry has no `VersionNewerThan`; rejected only once a record matches
    #[serde(default, rename = "VersionNewerThan")]
    pub watermark: String,
}

impl TrackedPackage {
    pub fn new(name: impl Into<String>, watermark: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            watermark: watermark.into(),
        }
    }
}

impl Config {
    /// Read and decode the configuration file
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| PersistenceError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Encode and write the configuration file
    ///
    /// The document is written to a sibling temporary file which then replaces
    /// `path`, so an interrupted write leaves the previous file intact.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_yaml::to_string(self).map_err(PersistenceError::Encode)?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let write_error = |source| PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp_path, content).map_err(write_error)?;
        fs::rename(&tmp_path, path).map_err(write_error)?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
