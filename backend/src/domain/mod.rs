//! Domain primitives, aggregates and services.
//!
//! Purpose: define the admissions entities, validate their inputs, and
//! implement the driving ports on top of the driven ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Course, University, Student, Application: catalogue and workflow
//!   entities.
//! - Account: operator identity used by sessions.
//! - Service types implementing each driving port.

pub mod account;
mod account_service;
pub mod application;
mod application_service;
pub mod contact;
mod contact_service;
pub mod course;
mod course_service;
pub mod error;
pub mod ids;
pub mod ports;
mod repository_errors;
pub mod seed;
mod seeding_service;
pub mod student;
mod student_service;
pub mod trace_id;
pub mod university;
mod university_service;
pub mod validation;

pub use self::account::{
    Account, LoginCredentials, LoginKind, NewAccount, PASSWORD_MIN_LEN, PasswordReset,
    PasswordResetConfirmation, Signup, normalise_login,
};
pub use self::account_service::AccountService;
pub use self::application::{
    Application, ApplicationFilter, ApplicationRequest, ApplicationTarget, EnrichedApplication,
    MAX_PAGE_LIMIT, MissingReference, Page,
};
pub use self::application_service::{
    ApplicationQueryService, ApplicationWorkflowPorts, ApplicationWorkflowService,
};
pub use self::contact::ContactMessage;
pub use self::contact_service::ContactService;
pub use self::course::{CUTOFF_MAX, CUTOFF_MIN, Course, CoursePatch, NewCourse};
pub use self::course_service::CourseService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{AccountId, ApplicationId, CourseId, StudentId, UniversityId};
pub use self::seeding_service::SeedingService;
pub use self::student::{KCSE_FIRST_YEAR, NewStudent, Student};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;
pub use self::university::{ESTABLISHED_AFTER, NewUniversity, University, UniversityPatch};
pub use self::university_service::UniversityService;
pub use self::validation::{FieldViolation, ValidationError, ViolationCode};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use admissions::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
