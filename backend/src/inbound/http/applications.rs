//! Application submission and listing handlers.
//!
//! ```text
//! POST   /api/v1/applications {"studentId":"..","courseId":"..","universityId":".."}
//! GET    /api/v1/applications?studentId=..&courseId=..&universityId=..&offset=0&limit=50
//! DELETE /api/v1/applications/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::Violations;
use crate::domain::{
    Application, ApplicationFilter, ApplicationId, ApplicationRequest, EnrichedApplication, Page,
    ViolationCode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, collect_body_id, parse_id, parse_optional_id};

const APPLICATION_ID: FieldName = FieldName::new("id");
const STUDENT_ID: FieldName = FieldName::new("studentId");
const COURSE_ID: FieldName = FieldName::new("courseId");
const UNIVERSITY_ID: FieldName = FieldName::new("universityId");

/// Submission body. Every id is required; absence is reported per field and
/// blank strings count as absent.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    pub student_id: Option<String>,
    pub course_id: Option<String>,
    pub university_id: Option<String>,
}

impl SubmitApplicationRequest {
    /// Malformed ids are rejected here together with any absent ones. When
    /// ids are only absent the request passes on and the domain reports them.
    fn into_domain(self) -> ApiResult<ApplicationRequest> {
        let mut violations = Violations::new();
        let request = ApplicationRequest {
            student_id: collect_body_id(&mut violations, self.student_id.as_deref(), STUDENT_ID),
            course_id: collect_body_id(&mut violations, self.course_id.as_deref(), COURSE_ID),
            university_id: collect_body_id(
                &mut violations,
                self.university_id.as_deref(),
                UNIVERSITY_ID,
            ),
        };
        if !violations.any(ViolationCode::InvalidFormat) {
            return Ok(request);
        }
        Ok(violations.finish(|| Some(request))?)
    }
}

/// Listing filters and pagination window. Filters combine with AND.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ApplicationListQuery {
    pub student_id: Option<String>,
    pub course_id: Option<String>,
    pub university_id: Option<String>,
    /// Rows to skip; defaults to 0.
    pub offset: Option<usize>,
    /// Page size, 1 to 500. Omit for the whole matching set.
    pub limit: Option<usize>,
}

impl ApplicationListQuery {
    fn into_domain(self) -> ApiResult<(ApplicationFilter, Page)> {
        let filter = ApplicationFilter {
            student_id: parse_optional_id(self.student_id.as_deref(), STUDENT_ID)?,
            course_id: parse_optional_id(self.course_id.as_deref(), COURSE_ID)?,
            university_id: parse_optional_id(self.university_id.as_deref(), UNIVERSITY_ID)?,
        };
        let page = Page::new(self.offset, self.limit)?;
        Ok((filter, page))
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub university_id: String,
    pub applied_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id.to_string(),
            student_id: value.student_id.to_string(),
            course_id: value.course_id.to_string(),
            university_id: value.university_id.to_string(),
            applied_at: value.applied_at.to_rfc3339(),
        }
    }
}

/// Listing row: the application plus the display names it references.
///
/// A name is `null` when the referenced record has since been deleted; the
/// entity is then named in `missing`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedApplicationResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    pub university_name: Option<String>,
    #[schema(example = json!(["course"]))]
    pub missing: Vec<String>,
}

impl From<EnrichedApplication> for EnrichedApplicationResponse {
    fn from(value: EnrichedApplication) -> Self {
        Self {
            application: value.application.into(),
            student_name: value.student_name,
            course_name: value.course_name,
            university_name: value.university_name,
            missing: value
                .missing
                .into_iter()
                .map(|reference| reference.as_str().to_owned())
                .collect(),
        }
    }
}

/// Submit an application after checking every referenced entity exists.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorSchema),
        (status = 404, description = "Course, university or student not found", body = ErrorSchema),
        (status = 409, description = "Student already applied to this course", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "submitApplication",
    security([])
)]
#[post("/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_domain()?;
    let application = state.applications.submit(request).await?;
    Ok(HttpResponse::Created().json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "Enriched applications in creation order", body = [EnrichedApplicationResponse]),
        (status = 400, description = "Malformed filter or page", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications",
    security([])
)]
#[get("/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    query: web::Query<ApplicationListQuery>,
) -> ApiResult<web::Json<Vec<EnrichedApplicationResponse>>> {
    let (filter, page) = query.into_inner().into_domain()?;
    let rows = state.applications_query.list(filter, page).await?;
    Ok(web::Json(rows.into_iter().map(Into::into).collect()))
}

/// Withdraw an application, returning the removed record.
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Removed application", body = ApplicationResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "withdrawApplication",
    security([])
)]
#[delete("/applications/{id}")]
pub async fn withdraw_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplicationResponse>> {
    let id: ApplicationId = parse_id(&path.into_inner(), APPLICATION_ID)?;
    let application = state.applications.withdraw(id).await?;
    Ok(web::Json(application.into()))
}
