//! Mail transport adapters.

mod tracing_mailer;

pub use tracing_mailer::TracingMailer;
