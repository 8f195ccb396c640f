//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Every table has
//! a `seq` column (bigserial) used to list rows in insertion order; row
//! structs never select or insert it.

diesel::table! {
    /// Course catalogue. `lower(name)` is unique (`courses_name_key`).
    courses (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Text,
        description -> Text,
        cutoff -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Universities and the ids of the courses they offer.
    universities (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Text,
        location -> Text,
        established_year -> Nullable<Int4>,
        course_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered students. Students are never updated.
    students (id) {
        id -> Uuid,
        seq -> Int8,
        first_name -> Text,
        surname -> Text,
        id_number -> Text,
        email -> Text,
        index_number -> Text,
        year_of_kcse -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications; `(student_id, course_id)` is unique
    /// (`applications_student_course_key`). References carry no foreign keys.
    applications (id) {
        id -> Uuid,
        seq -> Int8,
        student_id -> Uuid,
        course_id -> Uuid,
        university_id -> Uuid,
        applied_at -> Timestamptz,
    }
}

diesel::table! {
    /// Operator accounts and any outstanding password reset.
    accounts (id) {
        id -> Uuid,
        seq -> Int8,
        login -> Text,
        login_kind -> Text,
        phone -> Text,
        password_hash -> Text,
        reset_token_hash -> Nullable<Text>,
        reset_expires_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}
