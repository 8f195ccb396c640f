//! University entity.

use chrono::{DateTime, Datelike, Utc};

use super::validation::{ValidationError, ViolationCode, Violations};
use super::{CourseId, UniversityId};

/// Years at or below this bound are rejected as an establishment year.
pub const ESTABLISHED_AFTER: i32 = 1000;

/// A university offering courses.
///
/// ## Invariants
/// - `name` and `location` are trimmed and non-empty.
/// - `established_year`, when set, is after [`ESTABLISHED_AFTER`] and not in
///   the future.
/// - `course_ids` holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub location: String,
    pub established_year: Option<i32>,
    pub course_ids: Vec<CourseId>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated input for creating a university.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUniversity {
    pub name: Option<String>,
    pub location: Option<String>,
    pub established_year: Option<i32>,
    pub course_ids: Vec<CourseId>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversityPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub established_year: Option<i32>,
}

fn check_established(violations: &mut Violations, year: i32, now: DateTime<Utc>) -> Option<i32> {
    let current = now.year();
    if year > ESTABLISHED_AFTER && year <= current {
        Some(year)
    } else {
        violations.push(
            "establishedYear",
            ViolationCode::OutOfRange,
            format!("establishedYear must be between 1001 and {current}"),
        );
        None
    }
}

fn dedup_courses(course_ids: &[CourseId]) -> Vec<CourseId> {
    let mut unique = Vec::with_capacity(course_ids.len());
    for id in course_ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

impl University {
    /// Validate `input` and build a university. `now` also bounds the
    /// establishment year.
    pub fn create(
        input: &NewUniversity,
        id: UniversityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let name = violations.required_text("name", input.name.as_deref());
        let location = violations.required_text("location", input.location.as_deref());
        let established_year = match input.established_year {
            Some(year) => check_established(&mut violations, year, now).map(Some),
            None => Some(None),
        };

        violations.finish(|| {
            Some(Self {
                id,
                name: name?,
                location: location?,
                established_year: established_year?,
                course_ids: dedup_courses(&input.course_ids),
                created_at: now,
            })
        })
    }

    /// Apply a partial update, re-validating the establishment year.
    pub fn apply(
        &self,
        patch: &UniversityPatch,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let name = violations.optional_text("name", patch.name.as_deref());
        let location = violations.optional_text("location", patch.location.as_deref());
        let established_year = patch
            .established_year
            .and_then(|year| check_established(&mut violations, year, now));

        violations.finish(|| {
            Some(Self {
                name: name.unwrap_or_else(|| self.name.clone()),
                location: location.unwrap_or_else(|| self.location.clone()),
                established_year: established_year.or(self.established_year),
                ..self.clone()
            })
        })
    }

    /// Record that the university offers `course_id`. Returns `false` when it
    /// was already listed.
    pub fn attach_course(&mut self, course_id: CourseId) -> bool {
        if self.course_ids.contains(&course_id) {
            return false;
        }
        self.course_ids.push(course_id);
        true
    }
}
