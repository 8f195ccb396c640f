//! Admin seeding endpoints.
//!
//! Both endpoints wipe a collection and refill it with sample data. They
//! answer `403` unless seeding is enabled in configuration, and `401`
//! without a signed-in account.
//!
//! ```text
//! POST /api/v1/courses/seed
//! POST /api/v1/universities/seed
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{AccountId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::courses::CourseResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::universities::UniversityResponse;

/// Seeding result: how many records now exist, and the records themselves.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> SeedResponse<T> {
    fn from_items<D>(items: Vec<D>) -> Self
    where
        T: From<D>,
    {
        let items: Vec<T> = items.into_iter().map(T::from).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

fn authorise_seeding(state: &HttpState, session: &SessionContext) -> ApiResult<AccountId> {
    if !state.seeding_enabled {
        return Err(Error::forbidden("seeding is disabled"));
    }
    session.require_account_id()
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/seed",
    responses(
        (status = 200, description = "Courses replaced with sample data", body = SeedResponse<CourseResponse>),
        (status = 401, description = "Sign-in required", body = ErrorSchema),
        (status = 403, description = "Seeding disabled", body = ErrorSchema)
    ),
    tags = ["seed"],
    operation_id = "seedCourses",
    security(("SessionCookie" = []))
)]
#[post("/courses/seed")]
pub async fn seed_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SeedResponse<CourseResponse>>> {
    let account_id = authorise_seeding(&state, &session)?;
    info!(%account_id, "course seeding requested");
    let courses = state.seeding.seed_courses().await?;
    Ok(web::Json(SeedResponse::from_items(courses)))
}

#[utoipa::path(
    post,
    path = "/api/v1/universities/seed",
    responses(
        (status = 200, description = "Universities replaced with sample data", body = SeedResponse<UniversityResponse>),
        (status = 401, description = "Sign-in required", body = ErrorSchema),
        (status = 403, description = "Seeding disabled", body = ErrorSchema)
    ),
    tags = ["seed"],
    operation_id = "seedUniversities",
    security(("SessionCookie" = []))
)]
#[post("/universities/seed")]
pub async fn seed_universities(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SeedResponse<UniversityResponse>>> {
    let account_id = authorise_seeding(&state, &session)?;
    info!(%account_id, "university seeding requested");
    let universities = state.seeding.seed_universities().await?;
    Ok(web::Json(SeedResponse::from_items(universities)))
}
