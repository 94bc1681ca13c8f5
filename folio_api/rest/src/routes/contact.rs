use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use folio_models::contact::SubmissionResult;

use super::error;
use crate::models::contact::{ApiContactInfo, ApiContactRequest};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::get(get_info).post(submit))
        .with_state(service)
}

async fn get_info(service: State<Arc<impl ContactFeatureService>>) -> Response {
    Json(ApiContactInfo::from(service.get_info())).into_response()
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Json(request): Json<ApiContactRequest>,
) -> Response {
    match service.submit(request.into()).await {
        SubmissionResult::Success => Json(true).into_response(),
        SubmissionResult::Failure { reason } => error(StatusCode::BAD_GATEWAY, reason),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_core_settings_contracts::MockSettingsFeatureService;
    use folio_models::contact::{ContactInfo, ContactLink, ContactRequest};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::tests::make_sut;

    use super::*;

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let contact = MockContactFeatureService::new()
            .with_submit(make_request(), SubmissionResult::Success);
        let router = make_sut(contact, MockSettingsFeatureService::new());

        // Act
        let response = router.oneshot(post(make_body())).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!(true));
    }

    #[tokio::test]
    async fn submit_failure() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            make_request(),
            SubmissionResult::Failure {
                reason: "Unauthorized".into(),
            },
        );
        let router = make_sut(contact, MockSettingsFeatureService::new());

        // Act
        let response = router.oneshot(post(make_body())).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(read_json(response).await, json!({"detail": "Unauthorized"}));
    }

    #[tokio::test]
    async fn submit_message_too_long() {
        // Arrange
        let router = make_sut(
            MockContactFeatureService::new(),
            MockSettingsFeatureService::new(),
        );
        let mut body = make_body();
        body["message"] = "a".repeat(501).into();

        // Act
        let response = router.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn submit_empty_name() {
        // Arrange
        let router = make_sut(
            MockContactFeatureService::new(),
            MockSettingsFeatureService::new(),
        );
        let mut body = make_body();
        body["name"] = "".into();

        // Act
        let response = router.oneshot(post(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn get_info() {
        // Arrange
        let contact = MockContactFeatureService::new().with_get_info(ContactInfo {
            email: "me@example.org".parse().unwrap(),
            phone: None,
            availability: Some("9 AM - 6 PM IST".into()),
            location: Some("Mumbai, India".into()),
            links: vec![ContactLink {
                label: "GitHub".into(),
                url: "https://github.com/".into(),
            }],
            message_max_length: 500,
        });
        let router = make_sut(contact, MockSettingsFeatureService::new());

        // Act
        let response = router
            .oneshot(Request::get("/contact").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({
                "email": "me@example.org",
                "availability": "9 AM - 6 PM IST",
                "location": "Mumbai, India",
                "links": [{"label": "GitHub", "url": "https://github.com/"}],
                "message_max_length": 500,
            })
        );
    }

    fn post(body: serde_json::Value) -> Request<Body> {
        Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn make_body() -> serde_json::Value {
        json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "subject": "Hello",
            "message": "Hi",
        })
    }

    fn make_request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".try_into().unwrap(),
            email: "jane@x.com".parse().unwrap(),
            subject: "Hello".try_into().unwrap(),
            message: "Hi".try_into().unwrap(),
        }
    }
}
