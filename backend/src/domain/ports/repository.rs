//! Shared error type and constraint names for entity repositories.
//!
//! Every store backing reports uniqueness violations with the same constraint
//! names so the domain can tell which field collided.

use super::define_port_error;

/// Case-insensitive unique course name.
pub const COURSE_NAME_KEY: &str = "courses_name_key";
/// Case-insensitive unique university name.
pub const UNIVERSITY_NAME_KEY: &str = "universities_name_key";
/// Unique national id number per student.
pub const STUDENT_ID_NUMBER_KEY: &str = "students_id_number_key";
/// Unique email per student.
pub const STUDENT_EMAIL_KEY: &str = "students_email_key";
/// Unique KCSE index number per student.
pub const STUDENT_INDEX_NUMBER_KEY: &str = "students_index_number_key";
/// One application per student and course.
pub const APPLICATION_STUDENT_COURSE_KEY: &str = "applications_student_course_key";
/// Unique account login.
pub const ACCOUNT_LOGIN_KEY: &str = "accounts_login_key";
/// Unique account phone number.
pub const ACCOUNT_PHONE_KEY: &str = "accounts_phone_key";

/// Request field that a unique constraint protects, for error details.
pub fn constrained_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        COURSE_NAME_KEY | UNIVERSITY_NAME_KEY => Some("name"),
        STUDENT_ID_NUMBER_KEY => Some("idNumber"),
        STUDENT_EMAIL_KEY => Some("email"),
        STUDENT_INDEX_NUMBER_KEY => Some("indexNumber"),
        APPLICATION_STUDENT_COURSE_KEY => Some("courseId"),
        ACCOUNT_LOGIN_KEY => Some("login"),
        ACCOUNT_PHONE_KEY => Some("phone"),
        _ => None,
    }
}

/// Outcome of swapping a whole table for a new set of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Replaced<T> {
    /// Rows removed before inserting.
    pub cleared: usize,
    /// Rows written, in input order. Inputs colliding on a unique key are
    /// absent.
    pub stored: Vec<T>,
}

define_port_error! {
    /// Errors raised by entity repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A write would break a unique constraint.
        Duplicate { constraint: String } => "unique constraint violated: {constraint}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(APPLICATION_STUDENT_COURSE_KEY, Some("courseId"))]
    #[case(STUDENT_EMAIL_KEY, Some("email"))]
    #[case("some_other_index", None)]
    fn maps_constraints_to_fields(#[case] constraint: &str, #[case] field: Option<&str>) {
        assert_eq!(constrained_field(constraint), field);
    }

    #[rstest]
    fn duplicate_message_names_the_constraint() {
        let err = RepositoryError::duplicate(COURSE_NAME_KEY);
        assert_eq!(err.to_string(), "unique constraint violated: courses_name_key");
    }
}
