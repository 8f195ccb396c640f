//! Shared helpers for black-box HTTP tests over the in-memory backend.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use admissions::Trace;
use admissions::domain::TRACE_ID_HEADER;
use admissions::inbound::http::configure_api;
use admissions::inbound::http::state::HttpState;
use serde_json::Value;

/// `/api/v1` behind the trace middleware and a throwaway session key.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(configure_api))
}

/// Status, trace header, session cookie and JSON body of one response.
pub struct Snapshot {
    pub status: u16,
    pub trace_id: Option<String>,
    pub session: Option<Cookie<'static>>,
    pub body: Value,
}

impl Snapshot {
    pub fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }

    pub fn str_field(&self, field: &str) -> &str {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("response field {field} missing: {}", self.body))
    }

    pub fn items(&self) -> &Vec<Value> {
        self.body.as_array().expect("array body")
    }
}

/// One JSON request, optionally carrying a session cookie.
pub struct Call<'a> {
    method: Method,
    path: &'a str,
    body: Option<Value>,
    session: Option<&'a Cookie<'static>>,
}

impl<'a> Call<'a> {
    pub fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            body: None,
            session: None,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_session(mut self, cookie: &'a Cookie<'static>) -> Self {
        self.session = Some(cookie);
        self
    }

    fn into_request(self) -> Request {
        let mut request = actix_test::TestRequest::default()
            .method(self.method)
            .uri(self.path);
        if let Some(body) = self.body {
            request = request.set_json(body);
        }
        if let Some(cookie) = self.session {
            request = request.cookie(cookie.clone());
        }
        request.to_request()
    }
}

/// Send `call` and capture the response.
pub async fn send<S, B>(app: &S, call: Call<'_>) -> Snapshot
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, call.into_request()).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let session = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned());
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Snapshot {
        status,
        trace_id,
        session,
        body,
    }
}
