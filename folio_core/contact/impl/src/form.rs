//! Client side state of a single contact form.

use std::sync::Arc;

use folio_core_contact_contracts::ContactFeatureService;
use folio_models::contact::{
    ContactMessage, ContactName, ContactRequest, ContactSubject, Notification,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A contact form instance owning its field values and submission status.
///
/// Clones share the same state, so a second `submit` issued from a clone
/// while the first one is still in flight is rejected.
pub struct ContactForm<Contact> {
    contact: Arc<Contact>,
    state: Arc<Mutex<FormState>>,
}

impl<Contact> Clone for ContactForm<Contact> {
    fn clone(&self) -> Self {
        Self {
            contact: Arc::clone(&self.contact),
            state: Arc::clone(&self.state),
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    fields: ContactFormFields,
    status: SubmissionStatus,
}

/// Raw, unvalidated field values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormValidationError {
    #[error("Please enter your name.")]
    Name,
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Please enter a subject.")]
    Subject,
    #[error("Please enter a message of at most {} characters.", ContactMessage::MAX_LENGTH)]
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormSubmitError {
    #[error(transparent)]
    Invalid(#[from] ContactFormValidationError),
    #[error("A submission is already in progress.")]
    InFlight,
}

/// Marks the form as `Failed` if a submission is dropped before it settles.
struct SubmittingGuard(Option<Arc<Mutex<FormState>>>);

impl SubmittingGuard {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        let Some(state) = self.0.take() else {
            return;
        };

        warn!("Submission was cancelled before it completed");

        if let Ok(mut state) = state.try_lock() {
            state.abort_submission();
            return;
        }

        // Contended, finish on the runtime.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { state.lock().await.abort_submission() });
        }
    }
}

impl FormState {
    fn abort_submission(&mut self) {
        if self.status == SubmissionStatus::Submitting {
            self.status = SubmissionStatus::Failed;
        }
    }
}

impl ContactFormFields {
    pub fn validate(&self) -> Result<ContactRequest, ContactFormValidationError> {
        Ok(ContactRequest {
            name: ContactName::try_new(self.name.as_str())
                .map_err(|_| ContactFormValidationError::Name)?,
            email: self
                .email
                .trim()
                .parse()
                .map_err(|_| ContactFormValidationError::Email)?,
            subject: ContactSubject::try_new(self.subject.as_str())
                .map_err(|_| ContactFormValidationError::Subject)?,
            message: ContactMessage::try_new(self.message.as_str())
                .map_err(|_| ContactFormValidationError::Message)?,
        })
    }
}

impl<Contact: ContactFeatureService> ContactForm<Contact> {
    pub fn new(contact: Arc<Contact>) -> Self {
        Self {
            contact,
            state: Default::default(),
        }
    }

    pub async fn fields(&self) -> ContactFormFields {
        self.state.lock().await.fields.clone()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state.lock().await.status
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.state.lock().await.fields.name = name.into();
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        self.state.lock().await.fields.email = email.into();
    }

    pub async fn set_subject(&self, subject: impl Into<String>) {
        self.state.lock().await.fields.subject = subject.into();
    }

    pub async fn set_message(&self, message: impl Into<String>) {
        self.state.lock().await.fields.message = message.into();
    }

    pub async fn validate(&self) -> Result<ContactRequest, ContactFormValidationError> {
        self.state.lock().await.fields.validate()
    }

    /// Validate the fields and submit them.
    ///
    /// On success all fields are cleared, on failure they are kept so the
    /// user can retry. The status stays `Succeeded` or `Failed` until
    /// [`reset`](Self::reset) is called.
    pub async fn submit(&self) -> Result<Notification, ContactFormSubmitError> {
        let request = {
            let mut state = self.state.lock().await;
            if state.status == SubmissionStatus::Submitting {
                debug!("Ignoring submit while another submission is in flight");
                return Err(ContactFormSubmitError::InFlight);
            }
            let request = state.fields.validate()?;
            state.status = SubmissionStatus::Submitting;
            request
        };
        let guard = SubmittingGuard(Some(Arc::clone(&self.state)));

        let result = self.contact.submit(request).await;

        let mut state = self.state.lock().await;
        if result.is_success() {
            state.fields = Default::default();
            state.status = SubmissionStatus::Succeeded;
        } else {
            state.status = SubmissionStatus::Failed;
        }
        guard.disarm();

        Ok(Notification::from(&result))
    }

    /// Move a settled form back to `Idle`. Has no effect while submitting.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if state.status != SubmissionStatus::Submitting {
            state.status = SubmissionStatus::Idle;
        }
    }
}
