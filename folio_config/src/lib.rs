use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use config::{Environment, File, FileFormat};
use folio_models::{
    contact::ContactLink,
    email_address::{EmailAddress, EmailAddressWithName},
    settings::Theme,
    Sensitive,
};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATHS_VAR: &str = "FOLIO_CONFIG";

/// Prefix of environment variables overriding config values, e.g.
/// `FOLIO_CONTACT__EMAILJS__PUBLIC_KEY` sets `contact.emailjs.public_key`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the config files listed in `FOLIO_CONFIG` (or the default config)
/// and apply environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_VAR) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_from(&paths, &[], environment())
}

/// Load the given config files, followed by TOML snippets in `overrides`.
///
/// Environment variables are not considered.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    load_from(paths, overrides, Environment::default().source(Some(Default::default())))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn load_from(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    environment: Environment,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let config = overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .add_source(environment)
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.contact.validate()?;

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddress,
    pub fallback_email: EmailAddress,
    pub phone: Option<String>,
    pub availability: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<ContactLink>,
    pub provider: ContactProvider,
    pub emailjs: Option<EmailJsConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactProvider {
    EmailJs,
    Smtp,
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: Sensitive<String>,
    pub private_key: Option<Sensitive<String>>,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: Sensitive<String>,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsConfig {
    pub default_theme: Option<Theme>,
}

impl ContactConfig {
    fn validate(&self) -> anyhow::Result<()> {
        match self.provider {
            ContactProvider::EmailJs if self.emailjs.is_none() => {
                bail!("contact.provider is \"emailjs\", but contact.emailjs is missing")
            }
            ContactProvider::Smtp if self.smtp.is_none() => {
                bail!("contact.provider is \"smtp\", but contact.smtp is missing")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_PATHS: &[&str] = &[DEFAULT_CONFIG_PATH];

    #[test]
    fn load_default_config() {
        let config = load_with_override(DEFAULT_PATHS, &[]).unwrap();
        assert_eq!(config.contact.provider, ContactProvider::EmailJs);
        assert_eq!(config.settings.default_theme, Some(Theme::Light));
    }

    #[test]
    fn contact_card() {
        let config = load_with_override(DEFAULT_PATHS, &[]).unwrap();
        assert_eq!(config.contact.location.as_deref(), Some("Mumbai, India"));
        assert_eq!(
            config.contact.links.first(),
            Some(&ContactLink {
                label: "GitHub".into(),
                url: "https://github.com/".into(),
            })
        );
    }

    #[test]
    fn override_provider() {
        let config = load_with_override(
            DEFAULT_PATHS,
            &["contact.provider = \"smtp\"", "settings.default_theme = \"dark\""],
        )
        .unwrap();
        assert_eq!(config.contact.provider, ContactProvider::Smtp);
        assert_eq!(config.settings.default_theme, Some(Theme::Dark));
    }

    #[test]
    fn missing_provider_section() {
        let result = load_with_override(
            &[] as &[&str],
            &[r#"
            [http]
            address = "127.0.0.1:8000"

            [contact]
            recipient = "contact@example.com"
            fallback_email = "contact@example.com"
            provider = "smtp"
            "#],
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("contact.smtp is missing"), "{err}");
    }

    #[test]
    fn settings_optional() {
        let config = load_with_override(
            &[] as &[&str],
            &[r#"
            [http]
            address = "127.0.0.1:8000"

            [contact]
            recipient = "contact@example.com"
            fallback_email = "contact@example.com"
            provider = "emailjs"

            [contact.emailjs]
            service_id = "s"
            template_id = "t"
            public_key = "p"
            "#],
        )
        .unwrap();
        assert_eq!(config.settings.default_theme, None);
        assert!(config.http.allowed_origins.is_empty());
        assert_eq!(config.contact.phone, None);
        assert!(config.contact.links.is_empty());
    }

    #[test]
    fn environment_override() {
        let env = [
            ("FOLIO_CONTACT__EMAILJS__PUBLIC_KEY", "from-env"),
            ("FOLIO_CONTACT__FALLBACK_EMAIL", "me@example.org"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let config = load_from(DEFAULT_PATHS, &[], environment().source(Some(env))).unwrap();

        let emailjs = config.contact.emailjs.unwrap();
        assert_eq!(*emailjs.public_key, "from-env");
        assert_eq!(config.contact.fallback_email.as_str(), "me@example.org");
    }

    #[test]
    fn secrets_redacted() {
        let config = load_with_override(DEFAULT_PATHS, &[]).unwrap();
        let debug = format!("{:?}", config.contact.emailjs.unwrap());
        assert!(!debug.contains("test-public-key"), "{debug}");
    }

    #[test]
    fn missing_file() {
        let result = load_with_override(&["/does/not/exist.toml"], &[]);
        assert!(result.is_err());
    }
}
