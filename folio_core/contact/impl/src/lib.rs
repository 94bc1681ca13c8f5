use std::sync::Arc;

use folio_core_contact_contracts::ContactFeatureService;
use folio_di::Build;
use folio_models::{
    contact::{ContactInfo, ContactLink, ContactMessage, ContactRequest, SubmissionResult},
    email_address::EmailAddress,
};
use folio_shared_contracts::delivery::{DeliveryFailure, DeliveryPayload, DeliveryService};
use folio_utils::trace_instrument;
use tracing::{info, warn};

pub mod form;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Delivery> {
    delivery: Delivery,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Destination of all contact messages
    pub recipient: Arc<EmailAddress>,
    /// Published address users can write to if the form does not work
    pub fallback_email: Arc<EmailAddress>,
    pub phone: Option<Arc<str>>,
    pub availability: Option<Arc<str>>,
    pub location: Option<Arc<str>>,
    pub links: Arc<[ContactLink]>,
}

impl<Delivery> ContactFeatureService for ContactFeatureServiceImpl<Delivery>
where
    Delivery: DeliveryService,
{
    #[trace_instrument(skip(self, request))]
    async fn submit(&self, request: ContactRequest) -> SubmissionResult {
        let payload = DeliveryPayload {
            from_name: request.name,
            from_email: request.email,
            subject: request.subject,
            message: request.message,
            to_email: (*self.config.recipient).clone(),
        };

        match self.delivery.deliver(payload).await {
            Ok(()) => {
                info!("Contact message delivered");
                SubmissionResult::Success
            }
            Err(DeliveryFailure { reason }) => {
                warn!(has_reason = reason.is_some(), "Failed to deliver contact message");
                let reason = reason
                    .filter(|reason| !reason.trim().is_empty())
                    .unwrap_or_else(|| self.fallback_reason());
                SubmissionResult::Failure { reason }
            }
        }
    }

    fn get_info(&self) -> ContactInfo {
        ContactInfo {
            email: (*self.config.fallback_email).clone(),
            phone: self.config.phone.as_deref().map(Into::into),
            availability: self.config.availability.as_deref().map(Into::into),
            location: self.config.location.as_deref().map(Into::into),
            links: self.config.links.to_vec(),
            message_max_length: ContactMessage::MAX_LENGTH,
        }
    }
}

impl<Delivery> ContactFeatureServiceImpl<Delivery> {
    fn fallback_reason(&self) -> String {
        format!(
            "Please try again or email me directly at {}",
            self.config.fallback_email
        )
    }
}
