use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_settings_impl::SettingsFeatureServiceImpl;
use folio_email_impl::EmailServiceImpl;
use folio_extern_impl::emailjs::EmailJsApiServiceImpl;
use folio_shared_impl::delivery::DeliveryServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<ContactFeature, SettingsFeature>;

// Email
pub type Email = EmailServiceImpl;

// Extern
pub type EmailJsApi = EmailJsApiServiceImpl;

// Shared
pub type Delivery = DeliveryServiceImpl<EmailJsApi, Email>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Delivery>;

pub type SettingsFeature = SettingsFeatureServiceImpl;
