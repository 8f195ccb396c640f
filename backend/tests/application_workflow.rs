//! End-to-end application workflow: catalogue, registration, submission,
//! enriched listing and withdrawal over the in-memory backend.

mod support;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::Method;
use actix_web::test as actix_test;
use admissions::test_support::InMemoryBackend;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use support::{Call, send, test_app};

/// Ids of one course, one university offering it, and one student.
struct Catalogue {
    course: String,
    university: String,
    student: String,
}

#[fixture]
fn backend() -> InMemoryBackend {
    InMemoryBackend::new(false)
}

async fn create<S, B>(app: &S, path: &str, body: Value) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let created = send(app, Call::new(Method::POST, path).json(body)).await;
    assert_eq!(created.status, 201, "{path}: {}", created.body);
    created.str_field("id").to_owned()
}

async fn catalogue<S, B>(app: &S) -> Catalogue
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let course = create(
        app,
        "/api/v1/courses",
        json!({ "name": "Actuarial Science", "description": "Risk and finance.", "cutoff": 75 }),
    )
    .await;
    let university = create(
        app,
        "/api/v1/universities",
        json!({
            "name": "Kenyatta University",
            "location": "Nairobi, KU",
            "establishedYear": 1985,
            "courseIds": [course]
        }),
    )
    .await;
    let student = create(
        app,
        "/api/v1/students",
        json!({
            "firstName": "Achieng",
            "surname": "Otieno",
            "idNumber": "31234567",
            "email": "achieng@example.com",
            "indexNumber": "20301001001",
            "yearOfKcse": 2020
        }),
    )
    .await;
    Catalogue {
        course,
        university,
        student,
    }
}

fn submission(catalogue: &Catalogue) -> Value {
    json!({
        "studentId": catalogue.student,
        "courseId": catalogue.course,
        "universityId": catalogue.university
    })
}

#[rstest]
#[actix_web::test]
async fn submitted_application_is_listed_with_names(backend: InMemoryBackend) {
    let mailer = backend.mailer.clone();
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;

    let submitted = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(submission(&ids)),
    )
    .await;
    assert_eq!(submitted.status, 201);
    assert_eq!(submitted.str_field("studentId"), ids.student);
    let confirmation = mailer
        .last_to("achieng@example.com")
        .expect("confirmation mail");
    assert!(confirmation.body.contains("Actuarial Science at Kenyatta University"));

    let listed = send(
        &app,
        Call::new(
            Method::GET,
            &format!("/api/v1/applications?studentId={}", ids.student),
        ),
    )
    .await;
    assert_eq!(listed.status, 200);
    let rows = listed.items();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("studentName"), Some(&json!("Achieng Otieno")));
    assert_eq!(row.get("courseName"), Some(&json!("Actuarial Science")));
    assert_eq!(row.get("universityName"), Some(&json!("Kenyatta University")));
    assert_eq!(row.get("missing"), Some(&json!([])));
}

#[rstest]
#[actix_web::test]
async fn second_application_for_the_same_course_conflicts(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;

    let first = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(submission(&ids)),
    )
    .await;
    assert_eq!(first.status, 201);
    let second = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(submission(&ids)),
    )
    .await;
    assert_eq!(second.status, 409);
    assert_eq!(second.code(), Some("conflict"));
}

#[rstest]
#[actix_web::test]
async fn submission_checks_the_course_first(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;
    let unknown = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    let response = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(json!({
            "studentId": unknown,
            "courseId": unknown,
            "universityId": ids.university
        })),
    )
    .await;
    assert_eq!(response.status, 404);
    assert!(
        response
            .body
            .get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| message.starts_with("course"))
    );
}

#[rstest]
#[actix_web::test]
async fn missing_ids_are_reported_together(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;

    let response = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(json!({})),
    )
    .await;
    assert_eq!(response.status, 400);
    let violations = response
        .body
        .pointer("/details/violations")
        .and_then(Value::as_array)
        .expect("violations");
    assert_eq!(violations.len(), 3);
}

#[rstest]
#[actix_web::test]
async fn blank_and_malformed_ids_are_reported_per_field(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;

    let response = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(json!({
            "studentId": "",
            "courseId": "not-a-uuid"
        })),
    )
    .await;
    assert_eq!(response.status, 400);
    let codes: Vec<&str> = response
        .body
        .pointer("/details/violations")
        .and_then(Value::as_array)
        .expect("violations")
        .iter()
        .filter_map(|violation| violation.get("code").and_then(Value::as_str))
        .collect();
    assert_eq!(codes, ["missing", "invalid_format", "missing"]);
}

#[rstest]
#[actix_web::test]
async fn deleted_student_is_flagged_as_missing(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;
    send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(submission(&ids)),
    )
    .await;

    let removed = send(
        &app,
        Call::new(Method::DELETE, &format!("/api/v1/students/{}", ids.student)),
    )
    .await;
    assert_eq!(removed.status, 200);

    let listed = send(&app, Call::new(Method::GET, "/api/v1/applications")).await;
    let row = &listed.items()[0];
    assert_eq!(row.get("studentName"), Some(&Value::Null));
    assert_eq!(row.get("missing"), Some(&json!(["student"])));
}

#[rstest]
#[actix_web::test]
async fn withdrawn_application_leaves_the_listing(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;
    let submitted = send(
        &app,
        Call::new(Method::POST, "/api/v1/applications").json(submission(&ids)),
    )
    .await;
    let id = submitted.str_field("id").to_owned();
    let path = format!("/api/v1/applications/{id}");

    let withdrawn = send(&app, Call::new(Method::DELETE, &path)).await;
    assert_eq!(withdrawn.status, 200);
    assert_eq!(withdrawn.str_field("id"), id);

    let again = send(&app, Call::new(Method::DELETE, &path)).await;
    assert_eq!(again.status, 404);
    let listed = send(&app, Call::new(Method::GET, "/api/v1/applications")).await;
    assert!(listed.items().is_empty());
}

#[rstest]
#[case("limit=0")]
#[case("limit=501")]
#[case("courseId=not-a-uuid")]
#[actix_web::test]
async fn listing_rejects_bad_queries(backend: InMemoryBackend, #[case] query: &str) {
    let app = actix_test::init_service(test_app(backend.state)).await;

    let response = send(
        &app,
        Call::new(Method::GET, &format!("/api/v1/applications?{query}")),
    )
    .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.code(), Some("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn course_can_be_attached_to_a_university_once(backend: InMemoryBackend) {
    let app = actix_test::init_service(test_app(backend.state)).await;
    let ids = catalogue(&app).await;
    let other = create(
        &app,
        "/api/v1/courses",
        json!({ "name": "Networking", "description": "Networks.", "cutoff": 65 }),
    )
    .await;
    let path = format!("/api/v1/universities/{}/courses", ids.university);

    for _ in 0..2 {
        let attached = send(
            &app,
            Call::new(Method::POST, &path).json(json!({ "courseId": other })),
        )
        .await;
        assert_eq!(attached.status, 200);
        assert_eq!(
            attached.body.get("courseIds"),
            Some(&json!([ids.course, other]))
        );
    }
}
