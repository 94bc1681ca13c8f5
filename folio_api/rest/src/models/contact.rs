use folio_models::{
    contact::{
        ContactInfo, ContactLink, ContactMessage, ContactName, ContactRequest, ContactSubject,
    },
    email_address::EmailAddress,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ApiContactRequest {
    /// Full name of the sender
    pub name: ContactName,
    /// Email address to reply to
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

impl From<ApiContactRequest> for ContactRequest {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactInfo {
    pub email: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub links: Vec<ApiContactLink>,
    pub message_max_length: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiContactLink {
    pub label: String,
    pub url: String,
}

impl From<ContactInfo> for ApiContactInfo {
    fn from(value: ContactInfo) -> Self {
        Self {
            email: value.email,
            phone: value.phone,
            availability: value.availability,
            location: value.location,
            links: value.links.into_iter().map(Into::into).collect(),
            message_max_length: value.message_max_length,
        }
    }
}

impl From<ContactLink> for ApiContactLink {
    fn from(value: ContactLink) -> Self {
        Self {
            label: value.label,
            url: value.url,
        }
    }
}
