//! Contact-form relay.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{ContactRelay, Mailer, OutgoingMail};
use super::{ContactMessage, Error};

const CONTACT_SUBJECT: &str = "New Contact Message";

/// Implements [`ContactRelay`] by mailing a fixed inbox.
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    inbox: String,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, inbox: impl Into<String>) -> Self {
        Self {
            mailer,
            inbox: inbox.into(),
        }
    }
}

#[async_trait]
impl ContactRelay for ContactService {
    async fn relay(&self, message: ContactMessage) -> Result<(), Error> {
        let mail = OutgoingMail {
            to: self.inbox.clone(),
            subject: CONTACT_SUBJECT.to_owned(),
            body: message.render(),
        };
        self.mailer.send(&mail).await.map_err(|err| {
            warn!(error = %err, "contact message not relayed");
            Error::service_unavailable("contact inbox is unavailable")
        })?;
        info!(inbox = %self.inbox, "contact message relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::RecordingMailer;

    fn message() -> ContactMessage {
        ContactMessage::try_from_parts(Some("parent@example.com"), Some("Is there a bursary?"))
            .expect("valid message")
    }

    #[rstest]
    #[tokio::test]
    async fn relays_to_the_inbox() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = ContactService::new(mailer.clone(), "admissions@example.ac.ke");

        service.relay(message()).await.expect("relayed");

        let mail = mailer.last_to("admissions@example.ac.ke").expect("mail");
        assert_eq!(mail.subject, "New Contact Message");
        assert_eq!(
            mail.body,
            "Message from: parent@example.com\n\nIs there a bursary?"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delivery_failures_are_service_unavailable() {
        let service = ContactService::new(
            Arc::new(RecordingMailer::failing()),
            "admissions@example.ac.ke",
        );

        let err = service.relay(message()).await.expect_err("undelivered");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
