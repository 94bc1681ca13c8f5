use folio_models::settings::Theme;
use tokio::sync::watch;

/// Process wide user preferences.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SettingsFeatureService: Send + Sync + 'static {
    fn get_theme(&self) -> Theme;

    /// Update the theme. Returns `true` if the value actually changed.
    fn set_theme(&self, theme: Theme) -> bool;

    /// Receive the current theme and every subsequent change.
    fn subscribe_theme(&self) -> watch::Receiver<Theme>;
}

#[cfg(feature = "mock")]
impl MockSettingsFeatureService {
    pub fn with_get_theme(mut self, theme: Theme) -> Self {
        self.expect_get_theme().once().return_const(theme);
        self
    }

    pub fn with_set_theme(mut self, theme: Theme, changed: bool) -> Self {
        self.expect_set_theme()
            .once()
            .with(mockall::predicate::eq(theme))
            .return_const(changed);
        self
    }

    pub fn with_subscribe_theme(mut self, receiver: watch::Receiver<Theme>) -> Self {
        self.expect_subscribe_theme()
            .once()
            .return_once(move || receiver);
        self
    }
}
