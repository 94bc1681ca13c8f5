use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::{email_address::EmailAddress, sensitive_debug};

/// A message submitted via the contact form.
///
/// All fields are validated on construction, so a `ContactRequest` can always
/// be handed to the delivery provider as is.
#[derive(Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}
sensitive_debug!(ContactRequest);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(predicate = |message: &str| !message.trim().is_empty(), len_char_max = 500),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Maximum number of characters (not bytes) in a message.
    pub const MAX_LENGTH: usize = 500;
}

/// Outcome of a single submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    Failure { reason: String },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// User facing rendering of a [`SubmissionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

impl From<&SubmissionResult> for Notification {
    fn from(value: &SubmissionResult) -> Self {
        match value {
            SubmissionResult::Success => Self {
                title: "Message Sent Successfully!".into(),
                description: "Thanks for reaching out. I'll get back to you soon.".into(),
                variant: NotificationVariant::Default,
            },
            SubmissionResult::Failure { reason } => Self {
                title: "Failed to send message".into(),
                description: reason.clone(),
                variant: NotificationVariant::Destructive,
            },
        }
    }
}

/// Publicly visible information about the contact channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    /// Address to contact directly if the form does not work
    pub email: EmailAddress,
    pub phone: Option<String>,
    /// Free text such as office hours
    pub availability: Option<String>,
    pub location: Option<String>,
    pub links: Vec<ContactLink>,
    pub message_max_length: usize,
}

/// A social profile or other external link shown next to the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}
