//! Course entity and its validation rules.

use chrono::{DateTime, Utc};

use super::CourseId;
use super::validation::{ValidationError, ViolationCode, Violations};

/// Lowest accepted cutoff score.
pub const CUTOFF_MIN: u8 = 0;
/// Highest accepted cutoff score.
pub const CUTOFF_MAX: u8 = 100;

/// A course offered for application.
///
/// ## Invariants
/// - `name` and `description` are trimmed and non-empty.
/// - `cutoff` is a whole number within [`CUTOFF_MIN`]..=[`CUTOFF_MAX`].
/// - `name` is unique across courses, compared case-insensitively; the store
///   enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub cutoff: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated input for creating a course. `cutoff` carries the number as
/// submitted so fractional values can be rejected field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCourse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cutoff: Option<f64>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cutoff: Option<f64>,
}

fn check_cutoff(violations: &mut Violations, cutoff: f64) -> Option<u8> {
    if !cutoff.is_finite() || cutoff.fract() != 0.0 {
        violations.push(
            "cutoff",
            ViolationCode::InvalidFormat,
            "cutoff must be a whole number",
        );
        return None;
    }
    if cutoff < f64::from(CUTOFF_MIN) || cutoff > f64::from(CUTOFF_MAX) {
        violations.push(
            "cutoff",
            ViolationCode::OutOfRange,
            "cutoff must be an integer between 0 and 100",
        );
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "whole number already checked to lie within 0..=100"
    )]
    let whole = cutoff as u8;
    Some(whole)
}

impl Course {
    /// Validate `input` and build a new course stamped with `now`.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::{Course, CourseId, NewCourse};
    /// use chrono::Utc;
    ///
    /// let course = Course::create(
    ///     &NewCourse {
    ///         name: Some(" Data Science ".to_owned()),
    ///         description: Some("Statistics at scale".to_owned()),
    ///         cutoff: Some(90.0),
    ///     },
    ///     CourseId::random(),
    ///     Utc::now(),
    /// )
    /// .expect("valid course");
    /// assert_eq!(course.name, "Data Science");
    /// ```
    pub fn create(
        input: &NewCourse,
        id: CourseId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let name = violations.required_text("name", input.name.as_deref());
        let description = violations.required_text("description", input.description.as_deref());
        let cutoff = violations
            .required("cutoff", input.cutoff)
            .and_then(|cutoff| check_cutoff(&mut violations, cutoff));

        violations.finish(|| {
            Some(Self {
                id,
                name: name?,
                description: description?,
                cutoff: cutoff?,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// Apply a partial update, re-validating every supplied field.
    pub fn apply(&self, patch: &CoursePatch, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let name = violations.optional_text("name", patch.name.as_deref());
        let description = violations.optional_text("description", patch.description.as_deref());
        let cutoff = patch
            .cutoff
            .and_then(|cutoff| check_cutoff(&mut violations, cutoff));

        violations.finish(|| {
            Some(Self {
                id: self.id,
                name: name.unwrap_or_else(|| self.name.clone()),
                description: description.unwrap_or_else(|| self.description.clone()),
                cutoff: cutoff.unwrap_or(self.cutoff),
                created_at: self.created_at,
                updated_at: now,
            })
        })
    }

    /// One-line `"name: description"` summary.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }
}
