//! Report delivery
//!
//! - [`mailer`]: SMTP transport and message construction
//! - [`MailNotifier`]: sends the report to every configured recipient
//! - [`ConsoleNotifier`]: prints the report (dry-run mode)

pub mod mailer;

use std::io::Write;

use tracing::{error, info};

use crate::config::HeaderConfig;
pub use mailer::{MailTransport, NotificationError, OutgoingMail, SmtpMailer};

/// Destination of a rendered, non-empty report
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, report: &str);
}

/// Prints the report to standard output
pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, report: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout
            .write_all(report.as_bytes())
            .and_then(|_| stdout.flush())
            .inspect_err(|e| error!("Failed to print report: {}", e));
    }
}

/// Mails the report to every recipient, one message each
pub struct MailNotifier {
    transport: Box<dyn MailTransport>,
    header: HeaderConfig,
}

impl MailNotifier {
    pub fn new(transport: Box<dyn MailTransport>, header: HeaderConfig) -> Self {
        Self { transport, header }
    }
}

#[async_trait::async_trait]
impl Notifier for MailNotifier {
    /// A failed recipient is logged and does not stop delivery to the others
    async fn notify(&self, report: &str) {
        for to in &self.header.to {
            let mail = OutgoingMail {
                from: self.header.from.clone(),
                reply_to: self.header.reply_to.clone(),
                to: to.clone(),
                subject: self.header.subject.clone(),
                body: report.to_string(),
            };

            match self.transport.send(&mail).await {
                Ok(()) => info!("Sent report to {}", to),
                Err(e) => error!("Failed to send report to {}: {}", to, e),
            }
        }
    }
}
