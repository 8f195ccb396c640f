//! Course applications and the read models built over them.

use chrono::{DateTime, Utc};

use super::validation::{ValidationError, ViolationCode, Violations};
use super::{ApplicationId, CourseId, StudentId, UniversityId};

/// Largest page a caller may request from the application listing.
pub const MAX_PAGE_LIMIT: usize = 500;

/// A student's application to a course at a university.
///
/// At most one application exists per `(student_id, course_id)` pair. The
/// referenced entities are weak references and may be deleted later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub university_id: UniversityId,
    pub applied_at: DateTime<Utc>,
}

/// Submission request as received from a driving adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    pub university_id: Option<UniversityId>,
}

/// The identifiers of a request that passed shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationTarget {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub university_id: UniversityId,
}

impl ApplicationRequest {
    /// Check that every identifier is present.
    pub fn validate(&self) -> Result<ApplicationTarget, ValidationError> {
        let mut violations = Violations::new();
        let student_id = violations.required("studentId", self.student_id);
        let course_id = violations.required("courseId", self.course_id);
        let university_id = violations.required("universityId", self.university_id);

        violations.finish(|| {
            Some(ApplicationTarget {
                student_id: student_id?,
                course_id: course_id?,
                university_id: university_id?,
            })
        })
    }
}

impl Application {
    /// Build a new application for an already-verified target.
    pub fn submit(target: ApplicationTarget, id: ApplicationId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id: target.student_id,
            course_id: target.course_id,
            university_id: target.university_id,
            applied_at: now,
        }
    }
}

/// Conjunctive listing filter. `None` fields impose no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    pub university_id: Option<UniversityId>,
}

impl ApplicationFilter {
    /// Whether `application` satisfies every set constraint.
    pub fn matches(&self, application: &Application) -> bool {
        self.student_id.is_none_or(|id| id == application.student_id)
            && self.course_id.is_none_or(|id| id == application.course_id)
            && self
                .university_id
                .is_none_or(|id| id == application.university_id)
    }
}

/// Offset pagination window. The default window covers the whole set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    limit: Option<usize>,
}

impl Page {
    /// Build a window, rejecting a zero limit or one above [`MAX_PAGE_LIMIT`].
    pub fn new(offset: Option<usize>, limit: Option<usize>) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        if let Some(limit) = limit
            && !(1..=MAX_PAGE_LIMIT).contains(&limit)
        {
            violations.push(
                "limit",
                ViolationCode::OutOfRange,
                format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
            );
        }
        violations.finish(|| {
            Some(Self {
                offset: offset.unwrap_or(0),
                limit,
            })
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Referenced entity that could not be resolved during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingReference {
    Student,
    Course,
    University,
}

impl MissingReference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Course => "course",
            Self::University => "university",
        }
    }
}

/// Application joined with display names of the entities it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedApplication {
    pub application: Application,
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    pub university_name: Option<String>,
    pub missing: Vec<MissingReference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn application(student: StudentId, course: CourseId) -> Application {
        Application::submit(
            ApplicationTarget {
                student_id: student,
                course_id: course,
                university_id: UniversityId::random(),
            },
            ApplicationId::random(),
            Utc::now(),
        )
    }

    #[rstest]
    fn validate_lists_every_missing_id() {
        let err = ApplicationRequest {
            course_id: Some(CourseId::random()),
            ..ApplicationRequest::default()
        }
        .validate()
        .expect_err("ids missing");

        assert!(err.has("studentId", ViolationCode::Missing));
        assert!(err.has("universityId", ViolationCode::Missing));
        assert!(!err.has("courseId", ViolationCode::Missing));
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        let app = application(StudentId::random(), CourseId::random());
        assert!(ApplicationFilter::default().matches(&app));
    }

    #[rstest]
    fn filter_fields_are_conjunctive() {
        let student = StudentId::random();
        let course = CourseId::random();
        let app = application(student, course);

        let both = ApplicationFilter {
            student_id: Some(student),
            course_id: Some(course),
            university_id: None,
        };
        let wrong_course = ApplicationFilter {
            course_id: Some(CourseId::random()),
            ..both
        };

        assert!(both.matches(&app));
        assert!(!wrong_course.matches(&app));
    }

    #[rstest]
    #[case(Some(0), false)]
    #[case(Some(1), true)]
    #[case(Some(MAX_PAGE_LIMIT), true)]
    #[case(Some(MAX_PAGE_LIMIT + 1), false)]
    #[case(None, true)]
    fn page_limit_bounds(#[case] limit: Option<usize>, #[case] ok: bool) {
        assert_eq!(Page::new(None, limit).is_ok(), ok);
    }
}
