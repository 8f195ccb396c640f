//! Contact-form messages relayed to the admissions inbox.

use super::validation::{ValidationError, Violations};

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    email: String,
    message: String,
}

impl ContactMessage {
    /// Validate the sender address and message body.
    pub fn try_from_parts(
        email: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let email = violations.required_email("email", email);
        let message = violations.required_text("message", message);
        violations.finish(|| {
            Some(Self {
                email: email?,
                message: message?,
            })
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Body of the email forwarded to the inbox.
    pub fn render(&self) -> String {
        format!("Message from: {}\n\n{}", self.email, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViolationCode;
    use rstest::rstest;

    #[rstest]
    fn render_includes_sender_and_body() {
        let message = ContactMessage::try_from_parts(
            Some("parent@example.com"),
            Some("When do intakes open?"),
        )
        .expect("valid message");

        assert_eq!(
            message.render(),
            "Message from: parent@example.com\n\nWhen do intakes open?"
        );
    }

    #[rstest]
    fn rejects_blank_body_and_bad_address() {
        let err = ContactMessage::try_from_parts(Some("parent"), Some("  "))
            .expect_err("invalid message");

        assert!(err.has("email", ViolationCode::InvalidFormat));
        assert!(err.has("message", ViolationCode::Empty));
    }
}
