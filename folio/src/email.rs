use anyhow::Context;
use folio_config::{ContactConfig, ContactProvider};
use folio_email_contracts::EmailService;
use folio_email_impl::EmailServiceImpl;
use tracing::info;

/// Connect to the SMTP server if it is the configured contact provider.
pub async fn connect(config: &ContactConfig) -> anyhow::Result<Option<EmailServiceImpl>> {
    let (ContactProvider::Smtp, Some(smtp)) = (config.provider, &config.smtp) else {
        return Ok(None);
    };

    info!("Connecting to smtp server");
    let email = EmailServiceImpl::new(&smtp.url, smtp.from.clone())
        .await
        .context("Failed to connect to SMTP server")?;
    email.ping().await.context("Failed to reach SMTP server")?;

    Ok(Some(email))
}
