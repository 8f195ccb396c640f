//! University HTTP handlers.
//!
//! ```text
//! POST   /api/v1/universities
//! GET    /api/v1/universities
//! GET    /api/v1/universities/{id}
//! PUT    /api/v1/universities/{id}
//! DELETE /api/v1/universities/{id}
//! POST   /api/v1/universities/{id}/courses {"courseId":"..."}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CourseId, Error, NewUniversity, University, UniversityId, UniversityPatch, ValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_id_list, parse_optional_id};

const UNIVERSITY_ID: FieldName = FieldName::new("id");
const COURSE_ID: FieldName = FieldName::new("courseId");
const COURSE_IDS: FieldName = FieldName::new("courseIds");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityRequest {
    #[schema(example = "Nairobi University")]
    pub name: Option<String>,
    #[schema(example = "Nairobi, NU")]
    pub location: Option<String>,
    #[schema(example = 1970)]
    pub established_year: Option<i32>,
    /// Courses offered from day one. Each must already exist.
    #[serde(default)]
    pub course_ids: Vec<String>,
}

impl UniversityRequest {
    fn into_domain(self) -> ApiResult<NewUniversity> {
        Ok(NewUniversity {
            course_ids: parse_id_list(&self.course_ids, COURSE_IDS)?,
            name: self.name,
            location: self.location,
            established_year: self.established_year,
        })
    }
}

/// Partial update body; `courseIds` is managed through the attach endpoint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityPatchRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub established_year: Option<i32>,
}

impl From<UniversityPatchRequest> for UniversityPatch {
    fn from(value: UniversityPatchRequest) -> Self {
        Self {
            name: value.name,
            location: value.location,
            established_year: value.established_year,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachCourseRequest {
    pub course_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityResponse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub established_year: Option<i32>,
    pub course_ids: Vec<String>,
    pub created_at: String,
}

impl From<University> for UniversityResponse {
    fn from(value: University) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            location: value.location,
            established_year: value.established_year,
            course_ids: value.course_ids.iter().map(ToString::to_string).collect(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn university_id(path: web::Path<String>) -> ApiResult<UniversityId> {
    parse_id(&path.into_inner(), UNIVERSITY_ID)
}

#[utoipa::path(
    post,
    path = "/api/v1/universities",
    request_body = UniversityRequest,
    responses(
        (status = 201, description = "University created", body = UniversityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "A listed course does not exist", body = ErrorSchema),
        (status = 409, description = "University name already taken", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "createUniversity",
    security([])
)]
#[post("/universities")]
pub async fn create_university(
    state: web::Data<HttpState>,
    payload: web::Json<UniversityRequest>,
) -> ApiResult<HttpResponse> {
    let input = payload.into_inner().into_domain()?;
    let university = state.universities.create(input).await?;
    Ok(HttpResponse::Created().json(UniversityResponse::from(university)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities",
    responses(
        (status = 200, description = "Universities in creation order", body = [UniversityResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "listUniversities",
    security([])
)]
#[get("/universities")]
pub async fn list_universities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UniversityResponse>>> {
    let universities = state.universities.list().await?;
    Ok(web::Json(universities.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}",
    params(("id" = String, Path, description = "University id")),
    responses(
        (status = 200, description = "University", body = UniversityResponse),
        (status = 404, description = "Unknown university", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "getUniversity",
    security([])
)]
#[get("/universities/{id}")]
pub async fn get_university(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UniversityResponse>> {
    let university = state.universities.get(university_id(path)?).await?;
    Ok(web::Json(university.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/universities/{id}",
    params(("id" = String, Path, description = "University id")),
    request_body = UniversityPatchRequest,
    responses(
        (status = 200, description = "Updated university", body = UniversityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown university", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "updateUniversity",
    security([])
)]
#[put("/universities/{id}")]
pub async fn update_university(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UniversityPatchRequest>,
) -> ApiResult<web::Json<UniversityResponse>> {
    let id = university_id(path)?;
    let university = state
        .universities
        .update(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(university.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/universities/{id}",
    params(("id" = String, Path, description = "University id")),
    responses(
        (status = 200, description = "Removed university", body = UniversityResponse),
        (status = 404, description = "Unknown university", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "deleteUniversity",
    security([])
)]
#[delete("/universities/{id}")]
pub async fn delete_university(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UniversityResponse>> {
    let university = state.universities.delete(university_id(path)?).await?;
    Ok(web::Json(university.into()))
}

/// Attach an existing course. Attaching a course twice changes nothing.
#[utoipa::path(
    post,
    path = "/api/v1/universities/{id}/courses",
    params(("id" = String, Path, description = "University id")),
    request_body = AttachCourseRequest,
    responses(
        (status = 200, description = "University with the course attached", body = UniversityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown university or course", body = ErrorSchema)
    ),
    tags = ["universities"],
    operation_id = "addCourseToUniversity",
    security([])
)]
#[post("/universities/{id}/courses")]
pub async fn add_course_to_university(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AttachCourseRequest>,
) -> ApiResult<web::Json<UniversityResponse>> {
    let id = university_id(path)?;
    let course_id: CourseId = parse_optional_id(payload.course_id.as_deref(), COURSE_ID)?
        .ok_or_else(|| Error::from(ValidationError::missing("courseId")))?;
    let university = state.universities.add_course(id, course_id).await?;
    Ok(web::Json(university.into()))
}
