//! Contact form relay.
//!
//! ```text
//! POST /api/v1/contact {"email":"parent@example.com","message":"When do intakes open?"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ContactMessage;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "parent@example.com")]
    pub email: Option<String>,
    #[schema(example = "When do intakes open?")]
    pub message: Option<String>,
}

/// Forward a visitor message to the admissions inbox.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactRequest,
    responses(
        (status = 202, description = "Message relayed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Mail transport unavailable", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "sendContactMessage",
    security([])
)]
#[post("/contact")]
pub async fn send_contact_message(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let ContactRequest { email, message } = payload.into_inner();
    let message = ContactMessage::try_from_parts(email.as_deref(), message.as_deref())?;
    state.contact.relay(message).await?;
    Ok(HttpResponse::Accepted().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{MockPorts, api_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!({ "email": "parent@example.com", "message": "Hello" }), StatusCode::ACCEPTED)]
    #[case(json!({ "email": "parent", "message": "Hello" }), StatusCode::BAD_REQUEST)]
    #[case(json!({ "email": "parent@example.com", "message": "  " }), StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn relays_only_valid_messages(#[case] body: Value, #[case] expected: StatusCode) {
        let mut ports = MockPorts::default();
        ports
            .contact
            .expect_relay()
            .withf(|message| message.email() == "parent@example.com")
            .returning(|_| Ok(()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn mail_outage_is_503() {
        let mut ports = MockPorts::default();
        ports
            .contact
            .expect_relay()
            .returning(|_| Err(Error::service_unavailable("mail transport unavailable")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(json!({ "email": "parent@example.com", "message": "Hello" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
