//! Field-level validation shared by entity constructors.
//!
//! Validators collect every violation instead of stopping at the first one,
//! so clients can fix a whole form in a single round trip.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::json;

use super::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The field was absent.
    Missing,
    /// The field was present but blank after trimming.
    Empty,
    /// The value falls outside the accepted range.
    OutOfRange,
    /// The value does not match the expected shape.
    InvalidFormat,
    /// The value is shorter than the minimum length.
    TooShort,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub code: ViolationCode,
    pub message: String,
}

/// One or more field violations raised while validating input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// A single `missing` violation for `field`.
    pub fn missing(field: &'static str) -> Self {
        Self {
            violations: vec![FieldViolation {
                field,
                code: ViolationCode::Missing,
                message: format!("{field} is required"),
            }],
        }
    }

    /// Violations in the order they were detected.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` was rejected with `code`.
    pub fn has(&self, field: &str, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field && violation.code == code)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.violations.iter().map(|v| v.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::invalid_request(value.to_string())
            .with_details(json!({ "violations": value.violations }))
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Loose structural check for an email address: `local@domain.tld`.
pub fn looks_like_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Accumulator used by validators.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, field: &'static str, code: ViolationCode, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            code,
            message: message.into(),
        });
    }

    /// Require a non-blank string, returning it trimmed.
    pub fn required_text(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            None => {
                self.push(field, ViolationCode::Missing, format!("{field} is required"));
                None
            }
            Some("") => {
                self.push(field, ViolationCode::Empty, format!("{field} must not be empty"));
                None
            }
            Some(text) => Some(text.to_owned()),
        }
    }

    /// Validate an optional string; present values must not be blank.
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        match value {
            Some(raw) => self.required_text(field, Some(raw)),
            None => None,
        }
    }

    /// Require a non-blank email address, returning it trimmed.
    pub fn required_email(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        let email = self.required_text(field, value)?;
        if looks_like_email(&email) {
            Some(email)
        } else {
            self.push(
                field,
                ViolationCode::InvalidFormat,
                format!("{field} must be a valid email address"),
            );
            None
        }
    }

    /// Require a value, recording a `missing` violation when absent.
    pub fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, ViolationCode::Missing, format!("{field} is required"));
        }
        value
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any recorded violation carries `code`.
    pub fn any(&self, code: ViolationCode) -> bool {
        self.0.iter().any(|violation| violation.code == code)
    }

    /// Finish validation, yielding `value` only when nothing was rejected.
    ///
    /// `build` runs only when no violation was recorded, so it may rely on
    /// every required field being present.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.0.is_empty() {
            return Err(ValidationError { violations: self.0 });
        }
        build().ok_or_else(|| ValidationError {
            violations: vec![FieldViolation {
                field: "request",
                code: ViolationCode::Missing,
                message: "request is incomplete".to_owned(),
            }],
        })
    }
}
