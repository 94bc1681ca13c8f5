use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_settings_contracts::SettingsFeatureService;
use folio_di::Build;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Settings> {
    contact: Contact,
    settings: Settings,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl RestServerConfig {
    pub fn new(addr: SocketAddr, allowed_origins: &[String]) -> anyhow::Result<Self> {
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .with_context(|| format!("Invalid allowed origin: {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            addr,
            allowed_origins,
        })
    }
}

impl<Contact, Settings> RestServer<Contact, Settings>
where
    Contact: ContactFeatureService,
    Settings: SettingsFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Starting REST API on {addr}");

        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.config.allowed_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::CONTENT_TYPE]);

        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::settings::router(self.settings.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);

        router.layer(cors)
    }
}
