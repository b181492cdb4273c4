//! Shared test utilities

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use debwatch::config::{Config, HttpConfig};
use debwatch::index::{HttpIndexSource, PackagesParser};
use debwatch::monitor::Monitor;
use debwatch::notify::Notifier;

/// Notifier that remembers every report it was given
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    reports: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, report: &str) {
        self.reports.lock().unwrap().push(report.to_string());
    }
}

/// Monitor using the real HTTP source and Debian parser
pub fn create_monitor() -> Monitor {
    Monitor::new(
        Arc::new(HttpIndexSource::new(&HttpConfig::default()).unwrap()),
        Arc::new(PackagesParser::new()),
    )
}

/// Write a config tracking `packages` (name, watermark) in repository `name`
pub fn write_config(
    name: &str,
    urls: &[String],
    packages: &[(&str, &str)],
) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");

    let urls: String = urls.iter().map(|u| format!("      - {}\n", u)).collect();
    let packages: String = packages
        .iter()
        .map(|(name, version)| {
            format!(
                "      - Name: {}\n        VersionNewerThan: \"{}\"\n",
                name, version
            )
        })
        .collect();

    let content = format!(
        "Email:\n  Header:\n    From: monitor@example.org\n    Subject: Updates\n    To:\n      - ops@example.org\nRepo:\n  - Name: {}\n    URL:\n{}    Packages:\n{}",
        name, urls, packages
    );
    std::fs::write(&path, content).unwrap();

    (temp_dir, path)
}

pub fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap()
}

pub fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}
