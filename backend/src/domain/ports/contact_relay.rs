//! Driving port for the public contact form.

use async_trait::async_trait;

use crate::domain::{ContactMessage, Error};

/// Forward contact-form submissions to the admissions inbox.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn relay(&self, message: ContactMessage) -> Result<(), Error>;
}
