//! Mailer that keeps every message in memory.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{Mailer, MailerError, OutgoingMail};

/// Records sent mail. Optionally fails every delivery.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: bool,
}

impl RecordingMailer {
    /// A mailer whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            failing: true,
        }
    }

    /// Snapshot of delivered messages, oldest first.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(_) => panic!("mailer mutex"),
        }
    }

    /// The last message sent to `to`.
    pub fn last_to(&self, to: &str) -> Option<OutgoingMail> {
        self.sent().into_iter().rev().find(|mail| mail.to == to)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        if self.failing {
            return Err(MailerError::delivery("transport offline"));
        }
        match self.sent.lock() {
            Ok(mut sent) => sent.push(mail.clone()),
            Err(_) => panic!("mailer mutex"),
        }
        Ok(())
    }
}
