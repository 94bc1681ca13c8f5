use std::sync::Arc;

use folio_di::Build;
use folio_email_contracts::{Email, EmailService};
use folio_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsCredentials, EmailJsSendError, EmailJsTemplateParams,
};
use folio_shared_contracts::delivery::{DeliveryFailure, DeliveryPayload, DeliveryService};
use folio_utils::trace_instrument;
use tracing::{error, warn};

#[derive(Debug, Clone, Build)]
pub struct DeliveryServiceImpl<EmailJsApi, Email> {
    emailjs_api: EmailJsApi,
    /// Only available if the SMTP provider is configured.
    email: Option<Email>,
    config: DeliveryServiceConfig,
}

#[derive(Debug, Clone)]
pub enum DeliveryServiceConfig {
    EmailJs(Arc<EmailJsCredentials>),
    Smtp,
}

impl<EmailJsApi, EmailS> DeliveryService for DeliveryServiceImpl<EmailJsApi, EmailS>
where
    EmailJsApi: EmailJsApiService,
    EmailS: EmailService,
{
    #[trace_instrument(skip(self, payload))]
    async fn deliver(&self, payload: DeliveryPayload) -> Result<(), DeliveryFailure> {
        match &self.config {
            DeliveryServiceConfig::EmailJs(credentials) => {
                self.deliver_emailjs(credentials, payload).await
            }
            DeliveryServiceConfig::Smtp => self.deliver_smtp(payload).await,
        }
    }
}

impl<EmailJsApi, EmailS> DeliveryServiceImpl<EmailJsApi, EmailS>
where
    EmailJsApi: EmailJsApiService,
    EmailS: EmailService,
{
    async fn deliver_emailjs(
        &self,
        credentials: &EmailJsCredentials,
        payload: DeliveryPayload,
    ) -> Result<(), DeliveryFailure> {
        let params = EmailJsTemplateParams {
            from_name: payload.from_name.into_inner(),
            from_email: payload.from_email.to_string(),
            subject: payload.subject.into_inner(),
            message: payload.message.into_inner(),
            to_email: payload.to_email.to_string(),
        };

        match self.emailjs_api.send(credentials, params).await {
            Ok(()) => Ok(()),
            Err(EmailJsSendError::Rejected { status, text }) => {
                warn!(status, reason = %text, "EmailJS rejected the message");
                Err(DeliveryFailure { reason: Some(text) })
            }
            Err(EmailJsSendError::Other(err)) => {
                error!("Failed to send message via EmailJS: {err:#}");
                Err(DeliveryFailure { reason: None })
            }
        }
    }

    async fn deliver_smtp(&self, payload: DeliveryPayload) -> Result<(), DeliveryFailure> {
        let Some(email_service) = &self.email else {
            error!("SMTP delivery is configured, but no SMTP connection is available");
            return Err(DeliveryFailure { reason: None });
        };

        let email = Email {
            recipient: payload.to_email.into(),
            subject: format!("[Contact Form] {}", *payload.subject),
            body: format!(
                "Message from {} ({}):\n\n{}",
                *payload.from_name, payload.from_email, *payload.message
            ),
            reply_to: Some(payload.from_email.into()),
        };

        match email_service.send(email).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("SMTP server rejected the message");
                Err(DeliveryFailure { reason: None })
            }
            Err(err) => {
                error!("Failed to send message via SMTP: {err:#}");
                Err(DeliveryFailure { reason: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_email_contracts::MockEmailService;
    use folio_extern_contracts::emailjs::MockEmailJsApiService;
    use folio_utils::assert_matches;

    use super::*;

    type Sut = DeliveryServiceImpl<MockEmailJsApiService, MockEmailService>;

    #[tokio::test]
    async fn emailjs_ok() {
        // Arrange
        let credentials = make_credentials();
        let emailjs_api = MockEmailJsApiService::new().with_send(
            credentials.clone(),
            make_params(),
            Ok(()),
        );

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api,
            email: None,
            config: DeliveryServiceConfig::EmailJs(credentials.into()),
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn emailjs_rejected() {
        // Arrange
        let credentials = make_credentials();
        let emailjs_api = MockEmailJsApiService::new().with_send(
            credentials.clone(),
            make_params(),
            Err(EmailJsSendError::Rejected {
                status: 401,
                text: "Unauthorized".into(),
            }),
        );

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api,
            email: None,
            config: DeliveryServiceConfig::EmailJs(credentials.into()),
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        assert_eq!(
            result,
            Err(DeliveryFailure {
                reason: Some("Unauthorized".into())
            })
        );
    }

    #[tokio::test]
    async fn emailjs_transport_error() {
        // Arrange
        let credentials = make_credentials();
        let emailjs_api = MockEmailJsApiService::new().with_send(
            credentials.clone(),
            make_params(),
            Err(anyhow::anyhow!("connection refused").into()),
        );

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api,
            email: None,
            config: DeliveryServiceConfig::EmailJs(credentials.into()),
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        assert_eq!(result, Err(DeliveryFailure { reason: None }));
    }

    #[tokio::test]
    async fn smtp_ok() {
        // Arrange
        let email = MockEmailService::new().with_send(make_email(), true);

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api: MockEmailJsApiService::new(),
            email: Some(email),
            config: DeliveryServiceConfig::Smtp,
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn smtp_rejected() {
        // Arrange
        let email = MockEmailService::new().with_send(make_email(), false);

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api: MockEmailJsApiService::new(),
            email: Some(email),
            config: DeliveryServiceConfig::Smtp,
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryFailure { reason: None }));
    }

    #[tokio::test]
    async fn smtp_error() {
        // Arrange
        let email = MockEmailService::new().with_send_error(make_email(), "connection reset");

        let sut: Sut = DeliveryServiceImpl {
            emailjs_api: MockEmailJsApiService::new(),
            email: Some(email),
            config: DeliveryServiceConfig::Smtp,
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryFailure { reason: None }));
    }

    #[tokio::test]
    async fn smtp_not_connected() {
        // Arrange
        let sut: Sut = DeliveryServiceImpl {
            emailjs_api: MockEmailJsApiService::new(),
            email: None,
            config: DeliveryServiceConfig::Smtp,
        };

        // Act
        let result = sut.deliver(make_payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryFailure { reason: None }));
    }

    fn make_credentials() -> EmailJsCredentials {
        EmailJsCredentials {
            service_id: "service".into(),
            template_id: "template".into(),
            public_key: "public".to_owned().into(),
            private_key: None,
        }
    }

    fn make_payload() -> DeliveryPayload {
        DeliveryPayload {
            from_name: "Jane Doe".try_into().unwrap(),
            from_email: "jane@x.com".parse().unwrap(),
            subject: "Hello".try_into().unwrap(),
            message: "Hi".try_into().unwrap(),
            to_email: "contact@example.com".parse().unwrap(),
        }
    }

    fn make_params() -> EmailJsTemplateParams {
        EmailJsTemplateParams {
            from_name: "Jane Doe".into(),
            from_email: "jane@x.com".into(),
            subject: "Hello".into(),
            message: "Hi".into(),
            to_email: "contact@example.com".into(),
        }
    }

    fn make_email() -> Email {
        Email {
            recipient: "contact@example.com".parse().unwrap(),
            subject: "[Contact Form] Hello".into(),
            body: "Message from Jane Doe (jane@x.com):\n\nHi".into(),
            reply_to: Some("jane@x.com".parse().unwrap()),
        }
    }
}
