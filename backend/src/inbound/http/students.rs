//! Student HTTP handlers. Students cannot be updated once registered.
//!
//! ```text
//! POST   /api/v1/students
//! GET    /api/v1/students
//! GET    /api/v1/students/{id}
//! DELETE /api/v1/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewStudent, Student, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const STUDENT_ID: FieldName = FieldName::new("id");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Achieng")]
    pub first_name: Option<String>,
    #[schema(example = "Otieno")]
    pub surname: Option<String>,
    /// National id number.
    #[schema(example = "32456789")]
    pub id_number: Option<String>,
    #[schema(example = "achieng@example.com")]
    pub email: Option<String>,
    /// KCSE examination index number.
    #[schema(example = "20401001001")]
    pub index_number: Option<String>,
    #[schema(example = 2023)]
    pub year_of_kcse: Option<i32>,
}

impl From<StudentRequest> for NewStudent {
    fn from(value: StudentRequest) -> Self {
        Self {
            first_name: value.first_name,
            surname: value.surname,
            id_number: value.id_number,
            email: value.email,
            index_number: value.index_number,
            year_of_kcse: value.year_of_kcse,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub first_name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub index_number: String,
    pub year_of_kcse: i32,
    pub created_at: String,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        Self {
            id: value.id.to_string(),
            first_name: value.first_name,
            surname: value.surname,
            id_number: value.id_number,
            email: value.email,
            index_number: value.index_number,
            year_of_kcse: value.year_of_kcse,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn student_id(path: web::Path<String>) -> ApiResult<StudentId> {
    parse_id(&path.into_inner(), STUDENT_ID)
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Id number, email or index number taken", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "registerStudent",
    security([])
)]
#[post("/students")]
pub async fn register_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<HttpResponse> {
    let student = state.students.register(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students in registration order", body = [StudentResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents",
    security([])
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students.list().await?;
    Ok(web::Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent",
    security([])
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let student = state.students.get(student_id(path)?).await?;
    Ok(web::Json(student.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Removed student", body = StudentResponse),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent",
    security([])
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let student = state.students.delete(student_id(path)?).await?;
    Ok(web::Json(student.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{MockPorts, api_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn duplicate_email_maps_to_409_with_field() {
        let mut ports = MockPorts::default();
        ports.students.expect_register().times(1).returning(|_| {
            Err(Error::conflict("email is already registered")
                .with_details(json!({ "constraint": "students_email_key", "field": "email" })))
        });
        let app = test::init_service(api_app(ports.into_state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/students")
                .set_json(json!({
                    "firstName": "Achieng",
                    "surname": "Otieno",
                    "idNumber": "32456789",
                    "email": "achieng@example.com",
                    "indexNumber": "20401001001",
                    "yearOfKcse": 2023
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], json!("email"));
    }

    #[actix_web::test]
    async fn request_fields_reach_the_port() {
        let mut ports = MockPorts::default();
        ports
            .students
            .expect_register()
            .withf(|input| {
                input.year_of_kcse == Some(2023) && input.index_number.as_deref() == Some("204")
            })
            .times(1)
            .returning(|_| Err(Error::invalid_request("stop here")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/students")
                .set_json(json!({ "indexNumber": "204", "yearOfKcse": 2023 }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
