//! HTTP inbound adapter exposing the admissions REST endpoints.

pub mod accounts;
pub mod applications;
pub mod contact;
pub mod courses;
pub mod error;
pub mod health;
pub mod schemas;
pub mod seed;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod universities;
mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler and the extractor error handlers.
///
/// The caller supplies the surrounding scope and its session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use admissions::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(applications::submit_application)
        .service(applications::list_applications)
        .service(applications::withdraw_application)
        .service(seed::seed_courses)
        .service(courses::create_course)
        .service(courses::list_courses)
        .service(courses::get_course_summary)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(seed::seed_universities)
        .service(universities::create_university)
        .service(universities::list_universities)
        .service(universities::get_university)
        .service(universities::update_university)
        .service(universities::delete_university)
        .service(universities::add_course_to_university)
        .service(students::register_student)
        .service(students::list_students)
        .service(students::get_student)
        .service(students::delete_student)
        .service(accounts::sign_up)
        .service(accounts::sign_in)
        .service(accounts::sign_out)
        .service(accounts::request_password_reset)
        .service(accounts::confirm_password_reset)
        .service(contact::send_contact_message);
}
