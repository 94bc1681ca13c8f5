use anyhow::Context;
use folio_api_rest::RestServerConfig;
use folio_config::{Config, ContactProvider};
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_settings_impl::SettingsFeatureConfig;
use folio_di::provider;
use folio_extern_contracts::emailjs::EmailJsCredentials;
use folio_extern_impl::emailjs::EmailJsApiServiceConfig;
use folio_shared_impl::delivery::DeliveryServiceConfig;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Option<Email>,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Extern
            EmailJsApiServiceConfig,

            // Shared
            DeliveryServiceConfig,

            // Core
            ContactFeatureConfig,
            SettingsFeatureConfig,
        }
    }
}

impl Provider {
    /// `email` is only required if SMTP is the configured contact provider.
    pub fn new(config: ConfigProvider, email: Option<Email>) -> Self {
        Self {
            _state: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Extern
        emailjs_api_service_config: EmailJsApiServiceConfig,

        // Shared
        delivery_service_config: DeliveryServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        settings_feature_config: SettingsFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config =
            RestServerConfig::new(config.http.address, &config.http.allowed_origins)?;

        // Extern
        let emailjs_api_service_config = EmailJsApiServiceConfig::new(
            config
                .contact
                .emailjs
                .as_ref()
                .and_then(|emailjs| emailjs.endpoint_override.clone()),
        )?;

        // Shared
        let delivery_service_config = match config.contact.provider {
            ContactProvider::EmailJs => {
                let emailjs = config
                    .contact
                    .emailjs
                    .as_ref()
                    .context("contact.emailjs is missing")?;
                DeliveryServiceConfig::EmailJs(
                    EmailJsCredentials {
                        service_id: emailjs.service_id.clone(),
                        template_id: emailjs.template_id.clone(),
                        public_key: emailjs.public_key.clone(),
                        private_key: emailjs.private_key.clone(),
                    }
                    .into(),
                )
            }
            ContactProvider::Smtp => DeliveryServiceConfig::Smtp,
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
            fallback_email: config.contact.fallback_email.clone().into(),
            phone: config.contact.phone.as_deref().map(Into::into),
            availability: config.contact.availability.as_deref().map(Into::into),
            location: config.contact.location.as_deref().map(Into::into),
            links: config.contact.links.as_slice().into(),
        };

        let settings_feature_config = SettingsFeatureConfig {
            default_theme: config.settings.default_theme.unwrap_or_default(),
        };

        Ok(Self {
            _state: Default::default(),

            // API
            rest_server_config,

            // Extern
            emailjs_api_service_config,

            // Shared
            delivery_service_config,

            // Core
            contact_feature_config,
            settings_feature_config,
        })
    }
}
