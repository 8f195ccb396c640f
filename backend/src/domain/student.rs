//! Student entity. Students are immutable once registered.

use chrono::{DateTime, Datelike, Utc};

use super::StudentId;
use super::validation::{ValidationError, ViolationCode, Violations};

/// First year the KCSE examination was sat.
pub const KCSE_FIRST_YEAR: i32 = 1989;

/// A registered student.
///
/// ## Invariants
/// - Every text field is trimmed and non-empty.
/// - `id_number`, `email` and `index_number` are each unique across students;
///   the store enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub index_number: String,
    pub year_of_kcse: i32,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub index_number: Option<String>,
    pub year_of_kcse: Option<i32>,
}

impl Student {
    /// Validate `input` and build a student record.
    pub fn create(
        input: &NewStudent,
        id: StudentId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let first_name = violations.required_text("firstName", input.first_name.as_deref());
        let surname = violations.required_text("surname", input.surname.as_deref());
        let id_number = violations.required_text("idNumber", input.id_number.as_deref());
        let email = violations.required_email("email", input.email.as_deref());
        let index_number = violations.required_text("indexNumber", input.index_number.as_deref());
        let year_of_kcse = violations.required("yearOfKcse", input.year_of_kcse);
        if let Some(year) = year_of_kcse {
            let current = now.year();
            if !(KCSE_FIRST_YEAR..=current).contains(&year) {
                violations.push(
                    "yearOfKcse",
                    ViolationCode::OutOfRange,
                    format!("yearOfKcse must be between {KCSE_FIRST_YEAR} and {current}"),
                );
            }
        }

        violations.finish(|| {
            Some(Self {
                id,
                first_name: first_name?,
                surname: surname?,
                id_number: id_number?,
                email: email?.to_lowercase(),
                index_number: index_number?,
                year_of_kcse: year_of_kcse?,
                created_at: now,
            })
        })
    }

    /// Display name used when enriching applications.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete_input() -> NewStudent {
        NewStudent {
            first_name: Some("Achieng".to_owned()),
            surname: Some("Otieno".to_owned()),
            id_number: Some("32456789".to_owned()),
            email: Some("Achieng.Otieno@Example.com".to_owned()),
            index_number: Some("20401001001".to_owned()),
            year_of_kcse: Some(2024),
        }
    }

    #[rstest]
    fn create_normalises_email_case() {
        let student =
            Student::create(&complete_input(), StudentId::random(), Utc::now()).expect("valid");
        assert_eq!(student.email, "achieng.otieno@example.com");
        assert_eq!(student.full_name(), "Achieng Otieno");
    }

    #[rstest]
    fn create_rejects_malformed_email() {
        let mut input = complete_input();
        input.email = Some("achieng-at-example".to_owned());

        let err = Student::create(&input, StudentId::random(), Utc::now()).expect_err("bad email");
        assert!(err.has("email", ViolationCode::InvalidFormat));
    }

    #[rstest]
    #[case(1988)]
    #[case(3000)]
    fn create_rejects_implausible_kcse_year(#[case] year: i32) {
        let mut input = complete_input();
        input.year_of_kcse = Some(year);

        let err = Student::create(&input, StudentId::random(), Utc::now()).expect_err("bad year");
        assert!(err.has("yearOfKcse", ViolationCode::OutOfRange));
    }

    #[rstest]
    fn create_requires_all_fields() {
        let err = Student::create(&NewStudent::default(), StudentId::random(), Utc::now())
            .expect_err("empty input");
        assert_eq!(err.violations().len(), 6);
    }
}
