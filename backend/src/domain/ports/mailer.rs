//! Port for outbound transactional email.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailerError {
        /// The message could not be handed to the transport.
        Delivery { message: String } => "mail delivery failed: {message}",
    }
}

/// A plain-text email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError>;
}
