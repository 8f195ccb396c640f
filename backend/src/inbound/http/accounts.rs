//! Account sign-up, sign-in and password reset handlers.
//!
//! ```text
//! POST /api/v1/signup {"login":"registrar@example.ac.ke","password":"...","phone":"+254700000001"}
//! POST /api/v1/signin {"login":"registrar@example.ac.ke","password":"..."}
//! POST /api/v1/signout
//! POST /api/v1/password-resets {"email":"registrar@example.ac.ke"}
//! POST /api/v1/password-resets/confirm {"token":"...","newPassword":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{
    Account, Error, LoginCredentials, NewAccount, PasswordResetConfirmation, ValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Email address or username.
    #[schema(example = "registrar@example.ac.ke")]
    pub login: Option<String>,
    pub password: Option<String>,
    #[schema(example = "+254700000001")]
    pub phone: Option<String>,
}

impl From<SignupRequest> for NewAccount {
    fn from(value: SignupRequest) -> Self {
        Self {
            login: value.login,
            password: value.password.map(Zeroizing::new),
            phone: value.phone,
        }
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub login: String,
    pub password: String,
}

impl TryFrom<SigninRequest> for LoginCredentials {
    type Error = ValidationError;

    fn try_from(value: SigninRequest) -> Result<Self, Self::Error> {
        let password = Zeroizing::new(value.password);
        Self::try_from_parts(&value.login, &password)
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub email: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

impl TryFrom<PasswordResetConfirmRequest> for PasswordResetConfirmation {
    type Error = ValidationError;

    fn try_from(value: PasswordResetConfirmRequest) -> Result<Self, Self::Error> {
        let new_password = Zeroizing::new(value.new_password);
        Self::try_from_parts(&value.token, &new_password)
    }
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub login: String,
    #[schema(example = "email")]
    pub login_kind: String,
    pub phone: String,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        Self {
            id: value.id.to_string(),
            login: value.login,
            login_kind: value.login_kind.as_str().to_owned(),
            phone: value.phone,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Login or phone already registered", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signUp",
    security([])
)]
#[post("/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let account = state.accounts.sign_up(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signIn",
    security([])
)]
#[post("/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SigninRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let account_id = state.accounts.authenticate(&credentials).await?;
    session.persist_account(&account_id)?;
    info!(account_id = %account_id, "account signed in");
    Ok(HttpResponse::Ok().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/signout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "signOut",
    security([])
)]
#[post("/signout")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Email a reset token. Answers 202 whether or not the address is known.
#[utoipa::path(
    post,
    path = "/api/v1/password-resets",
    request_body = PasswordResetRequest,
    responses(
        (status = 202, description = "Reset accepted"),
        (status = 400, description = "Email missing", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "requestPasswordReset",
    security([])
)]
#[post("/password-resets")]
pub async fn request_password_reset(
    state: web::Data<HttpState>,
    payload: web::Json<PasswordResetRequest>,
) -> ApiResult<HttpResponse> {
    let email = payload
        .into_inner()
        .email
        .ok_or_else(|| Error::from(ValidationError::missing("email")))?;
    state.accounts.request_password_reset(&email).await?;
    Ok(HttpResponse::Accepted().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/password-resets/confirm",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Weak password, or unknown or expired token", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "confirmPasswordReset",
    security([])
)]
#[post("/password-resets/confirm")]
pub async fn confirm_password_reset(
    state: web::Data<HttpState>,
    payload: web::Json<PasswordResetConfirmRequest>,
) -> ApiResult<HttpResponse> {
    let confirmation = PasswordResetConfirmation::try_from(payload.into_inner())?;
    state.accounts.confirm_password_reset(confirmation).await?;
    Ok(HttpResponse::NoContent().finish())
}
