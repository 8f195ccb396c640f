//! OpenAPI schema definitions for domain types.
//!
//! The domain error type stays free of `utoipa`. These wrappers mirror its
//! wire shape so handlers can reference it in `responses(...)`.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store or mail transport is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "course 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    message: String,
    /// Correlation id, also sent as the `trace-id` header.
    #[schema(example = "6f1c2a52-8d1e-4a8f-9a53-4a7d5f0f3b1e")]
    trace_id: Option<String>,
    /// Field violations, the offending constraint, or the missing entity.
    details: Option<serde_json::Value>,
}
