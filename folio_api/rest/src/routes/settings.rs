use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing, Json, Router,
};
use folio_core_settings_contracts::SettingsFeatureService;
use folio_models::settings::Theme;
use futures::Stream;
use tokio::sync::watch;

use crate::models::settings::{ApiSetThemeRequest, ApiTheme};

pub fn router(service: Arc<impl SettingsFeatureService>) -> Router<()> {
    Router::new()
        .route("/settings/theme", routing::get(get_theme).put(set_theme))
        .route("/settings/theme/events", routing::get(theme_events))
        .with_state(service)
}

async fn get_theme(service: State<Arc<impl SettingsFeatureService>>) -> Response {
    Json(ApiTheme::from(service.get_theme())).into_response()
}

async fn set_theme(
    service: State<Arc<impl SettingsFeatureService>>,
    Json(ApiSetThemeRequest { theme }): Json<ApiSetThemeRequest>,
) -> Response {
    service.set_theme(theme.into());
    Json(theme).into_response()
}

async fn theme_events(service: State<Arc<impl SettingsFeatureService>>) -> Response {
    Sse::new(theme_stream(service.subscribe_theme()))
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Yields the current theme immediately, then once per change.
fn theme_stream(
    receiver: watch::Receiver<Theme>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold((receiver, true), |(mut receiver, first)| async move {
        if !first {
            receiver.changed().await.ok()?;
        }
        let theme = *receiver.borrow_and_update();
        let event = Event::default().event("theme").data(theme.as_str());
        Some((Ok(event), (receiver, false)))
    })
}
