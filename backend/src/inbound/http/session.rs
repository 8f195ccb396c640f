//! Cookie session wrapper.
//!
//! Handlers only see account-level operations: remember who signed in, ask
//! who is signed in, and forget them again.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccountId, Error};

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";

/// Newtype over the Actix session exposing account-scoped helpers.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in account, rotating the session id first.
    pub fn persist_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCOUNT_ID_KEY, account_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in account, if any. A tampered value reads as signed out.
    pub fn account_id(&self) -> Result<Option<AccountId>, Error> {
        let raw = self
            .0
            .get::<String>(ACCOUNT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match raw.parse::<AccountId>() {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid account id in session cookie");
                None
            }
        }))
    }

    /// Require a signed-in account or fail with `401 Unauthorized`.
    pub fn require_account_id(&self) -> Result<AccountId, Error> {
        self.account_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use uuid::Uuid;

    const ACCOUNT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    let id = AccountId::from_uuid(Uuid::parse_str(ACCOUNT).map_err(|_| {
                        Error::internal("fixture id")
                    })?);
                    session.persist_account(&id)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/set-invalid",
                web::get().to(|session: Session| async move {
                    session
                        .insert(ACCOUNT_ID_KEY, "not-a-uuid")
                        .expect("set invalid account id");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let id = session.require_account_id()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                }),
            )
            .route(
                "/purge",
                web::get().to(|session: SessionContext| async move {
                    session.purge();
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_account_id() {
        let app = test::init_service(session_test_app()).await;

        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, ACCOUNT);
    }

    #[actix_web::test]
    async fn missing_account_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_account_id_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let set = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn purge_expires_the_cookie() {
        let app = test::init_service(session_test_app()).await;
        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);

        let purged = test::call_service(
            &app,
            test::TestRequest::get().uri("/purge").cookie(cookie).to_request(),
        )
        .await;
        let removal = session_cookie(&purged);
        assert_eq!(removal.value(), "");
    }
}
