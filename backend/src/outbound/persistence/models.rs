//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, applications, courses, students, universities};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub cutoff: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable course columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub cutoff: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UniversityRow {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub established_year: Option<i32>,
    pub course_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Mutable university columns. `established_year` is only ever set, never
/// cleared, so `None` leaves the column untouched. `course_ids` is only
/// changed by appending.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = universities)]
pub(crate) struct UniversityUpdate<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub established_year: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub first_name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub index_number: String,
    pub year_of_kcse: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub university_id: Uuid,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub login: String,
    pub login_kind: String,
    pub phone: String,
    pub password_hash: String,
    pub reset_token_hash: Option<String>,
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Credential columns rewritten by password changes and resets.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AccountCredentialsUpdate<'a> {
    pub password_hash: &'a str,
    pub reset_token_hash: Option<&'a str>,
    pub reset_expires_at: Option<DateTime<Utc>>,
}
