//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP handler, the error envelope
//! wrappers and the session cookie security scheme. Request and response
//! bodies referenced by the handlers are collected automatically.
//!
//! The generated document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Admissions backend API",
        description = "Course and university catalogue, student registry and application workflow.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::get_course_summary,
        crate::inbound::http::universities::create_university,
        crate::inbound::http::universities::list_universities,
        crate::inbound::http::universities::get_university,
        crate::inbound::http::universities::update_university,
        crate::inbound::http::universities::delete_university,
        crate::inbound::http::universities::add_course_to_university,
        crate::inbound::http::students::register_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::withdraw_application,
        crate::inbound::http::accounts::sign_up,
        crate::inbound::http::accounts::sign_in,
        crate::inbound::http::accounts::sign_out,
        crate::inbound::http::accounts::request_password_reset,
        crate::inbound::http::accounts::confirm_password_reset,
        crate::inbound::http::contact::send_contact_message,
        crate::inbound::http::seed::seed_courses,
        crate::inbound::http::seed::seed_universities,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "courses", description = "Course catalogue"),
        (name = "universities", description = "Universities and the courses they offer"),
        (name = "students", description = "Student registry"),
        (name = "applications", description = "Application submission and listing"),
        (name = "accounts", description = "Operator accounts and sessions"),
        (name = "contact", description = "Contact form relay"),
        (name = "seed", description = "Sample catalogue data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case("/api/v1/courses")]
    #[case("/api/v1/courses/{id}/summary")]
    #[case("/api/v1/universities/{id}/courses")]
    #[case("/api/v1/applications")]
    #[case("/api/v1/signin")]
    #[case("/api/v1/password-resets/confirm")]
    #[case("/api/v1/contact")]
    #[case("/api/v1/universities/seed")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
