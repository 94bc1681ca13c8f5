use std::{collections::BTreeMap, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

const SEND_ROUTE: &str = "/api/v1.0/email/send";
const MESSAGES_ROUTE: &str = "/emailjs/messages";

const TEMPLATE_PARAMS: [&str; 5] = ["from_name", "from_email", "subject", "message", "to_email"];

#[derive(Debug, Clone)]
pub struct EmailJsTestCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
}

impl Default for EmailJsTestCredentials {
    fn default() -> Self {
        Self {
            service_id: "test-service".into(),
            template_id: "test-template".into(),
            public_key: "test-public-key".into(),
            private_key: None,
        }
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: EmailJsTestCredentials,
) -> anyhow::Result<()> {
    info!("Starting emailjs testing server on {host}:{port}");
    info!("API base url: http://{host}:{port}/");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Accepted messages: http://{host}:{port}{MESSAGES_ROUTE}");
    info!("Service ID: {:?}", credentials.service_id);
    info!("Template ID: {:?}", credentials.template_id);
    info!("Public key: {:?}", credentials.public_key);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, credentials).await
}

/// Serve the testing API on an already bound listener.
pub async fn serve(listener: TcpListener, credentials: EmailJsTestCredentials) -> anyhow::Result<()> {
    axum::serve(listener, router(credentials))
        .await
        .context("Failed to start HTTP server")
}

pub fn router(credentials: EmailJsTestCredentials) -> Router<()> {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .route(MESSAGES_ROUTE, routing::get(messages))
        .with_state(Arc::new(StateInner {
            credentials,
            messages: Default::default(),
        }))
}

type State = axum::extract::State<Arc<StateInner>>;
struct StateInner {
    credentials: EmailJsTestCredentials,
    messages: RwLock<Vec<BTreeMap<String, String>>>,
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default)]
    template_params: BTreeMap<String, String>,
}

async fn send(state: State, body: String) -> Response {
    let Ok(request) = serde_json::from_str::<SendRequest>(&body) else {
        return (StatusCode::BAD_REQUEST, "The request body is invalid").into_response();
    };

    let credentials = &state.credentials;

    if request.user_id != credentials.public_key {
        return (
            StatusCode::BAD_REQUEST,
            "The Public Key is invalid. To find this ID, visit https://dashboard.emailjs.com/admin/account",
        )
            .into_response();
    }
    if credentials.private_key.is_some() && request.access_token != credentials.private_key {
        return (StatusCode::FORBIDDEN, "The access token is invalid").into_response();
    }
    if request.service_id != credentials.service_id {
        return (
            StatusCode::BAD_REQUEST,
            "The service ID is invalid. To find this ID, visit https://dashboard.emailjs.com/admin",
        )
            .into_response();
    }
    if request.template_id != credentials.template_id {
        return (
            StatusCode::BAD_REQUEST,
            "The template ID not found. To find this ID, visit https://dashboard.emailjs.com/admin/templates",
        )
            .into_response();
    }
    if let Some(missing) = TEMPLATE_PARAMS
        .into_iter()
        .find(|&key| !request.template_params.contains_key(key))
    {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("The template parameter {missing:?} is missing"),
        )
            .into_response();
    }

    state.messages.write().await.push(request.template_params);

    "OK".into_response()
}

async fn messages(state: State) -> Response {
    Json(&*state.messages.read().await).into_response()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    async fn spawn() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(serve(listener, Default::default()));
        url
    }

    fn body() -> serde_json::Value {
        json!({
            "service_id": "test-service",
            "template_id": "test-template",
            "user_id": "test-public-key",
            "template_params": {
                "from_name": "Jane Doe",
                "from_email": "jane@x.com",
                "subject": "Hello",
                "message": "Hi",
                "to_email": "contact@example.com",
            },
        })
    }

    #[tokio::test]
    async fn send_and_list() {
        let url = spawn().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{url}{SEND_ROUTE}"))
            .json(&body())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "OK");

        let messages = client
            .get(format!("{url}{MESSAGES_ROUTE}"))
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap();
        assert_eq!(messages, json!([body()["template_params"]]));
    }

    #[tokio::test]
    async fn missing_param() {
        let url = spawn().await;
        let mut body = body();
        body["template_params"]
            .as_object_mut()
            .unwrap()
            .remove("to_email");

        let response = reqwest::Client::new()
            .post(format!("{url}{SEND_ROUTE}"))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 422);
        assert!(response.text().await.unwrap().contains("to_email"));
    }
}
