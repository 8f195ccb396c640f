//! Mailer that writes outgoing mail to the structured log.
//!
//! Stands in for an SMTP transport: each message becomes one `info` event
//! carrying the sender, recipient and subject. Bodies are logged at `debug`
//! because they can contain reset tokens.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{Mailer, MailerError, OutgoingMail};

/// [`Mailer`] that logs instead of sending.
#[derive(Debug, Clone)]
pub struct TracingMailer {
    from: String,
}

impl TracingMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        if mail.to.trim().is_empty() {
            return Err(MailerError::delivery("recipient address is empty"));
        }
        info!(from = %self.from, to = %mail.to, subject = %mail.subject, "mail dispatched");
        debug!(to = %mail.to, body = %mail.body, "mail body");
        Ok(())
    }
}
