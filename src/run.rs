//! One complete monitoring cycle: load, check, notify, persist

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::MonitorError;
use crate::index::http::HttpIndexSource;
use crate::index::packages::PackagesParser;
use crate::monitor::Monitor;
use crate::notify::{ConsoleNotifier, MailNotifier, Notifier, SmtpMailer};

/// Options taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub config_path: PathBuf,
    /// Write raised watermarks back to the configuration file
    pub update_config: bool,
    /// Print the report instead of mailing it
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            update_config: true,
            dry_run: false,
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rendered report; empty when nothing advanced
    pub report: String,
    pub advanced: usize,
    pub config_saved: bool,
}

/// Run a cycle with the HTTP source, the Debian parser and the notifier selected by `options`
pub async fn run(options: &RunOptions) -> Result<RunSummary, MonitorError> {
    let config = Config::load(&options.config_path)?;

    let monitor = Monitor::new(
        Arc::new(HttpIndexSource::new(&config.http)?),
        Arc::new(PackagesParser::new()),
    );

    let notifier: Box<dyn Notifier> = if options.dry_run {
        Box::new(ConsoleNotifier)
    } else {
        Box::new(MailNotifier::new(
            Box::new(SmtpMailer::new(config.email.smtp.clone())),
            config.email.header.clone(),
        ))
    };

    execute(options, config, &monitor, notifier.as_ref()).await
}

/// Check every repository, deliver a non-empty report and persist raised watermarks
///
/// Nothing is written unless every repository was checked successfully.
pub async fn execute(
    options: &RunOptions,
    config: Config,
    monitor: &Monitor,
    notifier: &dyn Notifier,
) -> Result<RunSummary, MonitorError> {
    let outcome = monitor.check(&config).await?;
    let report = outcome.report.render();

    if outcome.report.is_empty() {
        info!("No package advanced");
    } else {
        notifier.notify(&report).await;
    }

    let changed = outcome.config != config;
    let config_saved = options.update_config && changed;
    if config_saved {
        outcome.config.save(&options.config_path)?;
        info!("Updated watermarks in {}", options.config_path.display());
    }

    Ok(RunSummary {
        report,
        advanced: outcome.report.len(),
        config_saved,
    })
}
