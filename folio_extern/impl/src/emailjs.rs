use std::sync::Arc;

use anyhow::Context;
use folio_di::Build;
use folio_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsCredentials, EmailJsSendError, EmailJsTemplateParams,
};
use folio_utils::trace_instrument;
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const API_BASE_URL: &str = "https://api.emailjs.com/";
const SEND_PATH: &str = "api/v1.0/email/send";

#[derive(Debug, Clone, Build)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    /// `base_url_override` replaces `https://api.emailjs.com/`, e.g. to point
    /// the client at a mock server.
    pub fn new(base_url_override: Option<Url>) -> anyhow::Result<Self> {
        let base_url = match base_url_override {
            Some(url) => url,
            None => API_BASE_URL.parse()?,
        };
        let send_endpoint = base_url
            .join(SEND_PATH)
            .context("Failed to build EmailJS send URL")?;

        Ok(Self {
            send_endpoint: send_endpoint.into(),
        })
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    #[trace_instrument(skip(self, credentials, params))]
    async fn send(
        &self,
        credentials: &EmailJsCredentials,
        params: EmailJsTemplateParams,
    ) -> Result<(), EmailJsSendError> {
        let request = SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            access_token: credentials.private_key.as_deref().map(String::as_str),
            template_params: params,
        };

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to send EmailJS request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response
            .text()
            .await
            .context("Failed to read EmailJS error response")?;

        Err(EmailJsSendError::Rejected {
            status: status.as_u16(),
            text,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: EmailJsTemplateParams,
}
