//! Course HTTP handlers.
//!
//! ```text
//! POST   /api/v1/courses
//! GET    /api/v1/courses
//! GET    /api/v1/courses/{id}
//! PUT    /api/v1/courses/{id}
//! DELETE /api/v1/courses/{id}
//! GET    /api/v1/courses/{id}/summary
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, CourseId, CoursePatch, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const COURSE_ID: FieldName = FieldName::new("id");

/// Body for creating or partially updating a course.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[schema(example = "Data Science")]
    pub name: Option<String>,
    #[schema(example = "Statistics and machine learning at scale")]
    pub description: Option<String>,
    /// Whole number between 0 and 100.
    #[schema(example = 90)]
    pub cutoff: Option<f64>,
}

impl From<CourseRequest> for NewCourse {
    fn from(value: CourseRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            cutoff: value.cutoff,
        }
    }
}

impl From<CourseRequest> for CoursePatch {
    fn from(value: CourseRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            cutoff: value.cutoff,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cutoff: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            cutoff: value.cutoff,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn course_id(path: web::Path<String>) -> ApiResult<CourseId> {
    parse_id(&path.into_inner(), COURSE_ID)
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Course name already taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse",
    security([])
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let course = state.courses.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Courses in creation order", body = [CourseResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state.courses.list().await?;
    Ok(web::Json(courses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course = state.courses.get(course_id(path)?).await?;
    Ok(web::Json(course.into()))
}

/// Partially update a course. Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 409, description = "Course name already taken", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse",
    security([])
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = course_id(path)?;
    let course = state
        .courses
        .update(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(course.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Removed course", body = CourseResponse),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse",
    security([])
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course = state.courses.delete(course_id(path)?).await?;
    Ok(web::Json(course.into()))
}

/// One-line `"name: description"` summary, returned as a JSON string.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/summary",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course summary", body = String),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourseSummary",
    security([])
)]
#[get("/courses/{id}/summary")]
pub async fn get_course_summary(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<String>> {
    let summary = state.courses.summary(course_id(path)?).await?;
    Ok(web::Json(summary))
}
