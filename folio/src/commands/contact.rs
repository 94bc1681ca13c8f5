use std::sync::Arc;

use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_impl::form::ContactForm;
use folio_di::Provides;
use folio_models::contact::NotificationVariant;

use crate::{
    email,
    environment::{types::ContactFeature, ConfigProvider, Provider},
};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form pipeline
    Send {
        /// Full name of the sender
        #[arg(long)]
        name: String,
        /// Email address of the sender
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                subject,
                message,
            } => send(config, name, email, subject, message).await,
        }
    }
}

async fn send(
    config: Config,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> anyhow::Result<()> {
    let email_service = email::connect(&config.contact).await?;

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email_service);
    let contact: ContactFeature = provider.provide();

    let form = ContactForm::new(Arc::new(contact));
    form.set_name(name).await;
    form.set_email(email).await;
    form.set_subject(subject).await;
    form.set_message(message).await;

    let notification = form.submit().await?;
    println!("{}\n{}", notification.title, notification.description);

    if notification.variant == NotificationVariant::Destructive {
        bail!("Failed to send message");
    }

    Ok(())
}
