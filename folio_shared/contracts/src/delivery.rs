use std::future::Future;

use folio_models::{
    contact::{ContactMessage, ContactName, ContactSubject},
    email_address::EmailAddress,
    sensitive_debug,
};
use thiserror::Error;

/// Provider agnostic capability to deliver a contact message.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DeliveryService: Send + Sync + 'static {
    /// Hand the payload to the configured provider. Called exactly once per
    /// submission; implementations must not retry.
    fn deliver(
        &self,
        payload: DeliveryPayload,
    ) -> impl Future<Output = Result<(), DeliveryFailure>> + Send;
}

#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryPayload {
    pub from_name: ContactName,
    pub from_email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
    pub to_email: EmailAddress,
}
sensitive_debug!(DeliveryPayload);

/// The provider did not accept the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to deliver message{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
pub struct DeliveryFailure {
    /// Diagnostic text from the provider, if it sent one.
    pub reason: Option<String>,
}

#[cfg(feature = "mock")]
impl MockDeliveryService {
    pub fn with_deliver(
        mut self,
        payload: DeliveryPayload,
        result: Result<(), DeliveryFailure>,
    ) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
