use std::future::Future;

use folio_models::Sensitive;
use serde::Serialize;
use thiserror::Error;

/// Client for the EmailJS REST API.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Render the template `template_id` with `params` and send the result via
    /// the email service `service_id`.
    fn send(
        &self,
        credentials: &EmailJsCredentials,
        params: EmailJsTemplateParams,
    ) -> impl Future<Output = Result<(), EmailJsSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: Sensitive<String>,
    pub private_key: Option<Sensitive<String>>,
}

/// Variables available in the EmailJS template.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct EmailJsTemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
}
folio_models::sensitive_debug!(EmailJsTemplateParams);

#[derive(Debug, Error)]
pub enum EmailJsSendError {
    /// EmailJS answered with a non-success status code. `text` is the
    /// diagnostic message from the response body.
    #[error("EmailJS rejected the request with status {status}: {text}")]
    Rejected { status: u16, text: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(
        mut self,
        credentials: EmailJsCredentials,
        params: EmailJsTemplateParams,
        result: Result<(), EmailJsSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(credentials),
                mockall::predicate::eq(params),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
