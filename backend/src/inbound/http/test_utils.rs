//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use std::sync::Arc;

use crate::domain::ports::{
    MockAccountCommand, MockApplicationCommand, MockApplicationQuery, MockCatalogueSeeding,
    MockContactRelay, MockCourseManagement, MockStudentDirectory, MockUniversityManagement,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set on a response, panicking when absent.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// One mock per driving port. Set expectations, then call [`Self::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub courses: MockCourseManagement,
    pub universities: MockUniversityManagement,
    pub students: MockStudentDirectory,
    pub applications: MockApplicationCommand,
    pub applications_query: MockApplicationQuery,
    pub accounts: MockAccountCommand,
    pub contact: MockContactRelay,
    pub seeding: MockCatalogueSeeding,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            courses: Arc::new(self.courses),
            universities: Arc::new(self.universities),
            students: Arc::new(self.students),
            applications: Arc::new(self.applications),
            applications_query: Arc::new(self.applications_query),
            accounts: Arc::new(self.accounts),
            contact: Arc::new(self.contact),
            seeding: Arc::new(self.seeding),
        })
    }
}

/// Full `/api/v1` surface over `state`, with a throwaway session key.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}
