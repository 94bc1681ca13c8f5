use std::sync::{Arc, OnceLock};

use folio_core_settings_contracts::SettingsFeatureService;
use folio_di::Build;
use folio_models::settings::Theme;
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, Build)]
pub struct SettingsFeatureServiceImpl {
    config: SettingsFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsFeatureConfig {
    /// Theme used until it is changed for the first time
    pub default_theme: Theme,
}

#[derive(Debug, Default)]
struct State {
    theme: OnceLock<watch::Sender<Theme>>,
}

impl SettingsFeatureService for SettingsFeatureServiceImpl {
    fn get_theme(&self) -> Theme {
        *self.theme().borrow()
    }

    fn set_theme(&self, theme: Theme) -> bool {
        let changed = self.theme().send_if_modified(|current| {
            let changed = *current != theme;
            *current = theme;
            changed
        });

        if changed {
            info!(%theme, "Theme changed");
        }

        changed
    }

    fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.theme().subscribe()
    }
}

impl SettingsFeatureServiceImpl {
    fn theme(&self) -> &watch::Sender<Theme> {
        self.state.theme.get_or_init(|| {
            debug!(theme = %self.config.default_theme, "Initializing theme");
            watch::Sender::new(self.config.default_theme)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sut(default_theme: Theme) -> SettingsFeatureServiceImpl {
        SettingsFeatureServiceImpl {
            config: SettingsFeatureConfig { default_theme },
            state: Default::default(),
        }
    }

    #[test]
    fn default_light() {
        let sut = make_sut(Theme::default());
        assert_eq!(sut.get_theme(), Theme::Light);
    }

    #[test]
    fn initialized_from_config() {
        let sut = make_sut(Theme::Dark);
        assert_eq!(sut.get_theme(), Theme::Dark);
    }

    #[test]
    fn set_and_get() {
        // Arrange
        let sut = make_sut(Theme::Light);

        // Act
        let changed = sut.set_theme(Theme::Dark);
        let unchanged = sut.set_theme(Theme::Dark);

        // Assert
        assert!(changed);
        assert!(!unchanged);
        assert_eq!(sut.get_theme(), Theme::Dark);
    }

    #[test]
    fn clones_share_state() {
        let sut = make_sut(Theme::Light);
        let clone = sut.clone();

        sut.set_theme(Theme::Dark);

        assert_eq!(clone.get_theme(), Theme::Dark);
    }

    #[test]
    fn subscribers_only_notified_on_change() {
        // Arrange
        let sut = make_sut(Theme::Light);
        let mut receiver = sut.subscribe_theme();

        // Act
        sut.set_theme(Theme::Light);
        let after_noop = receiver.has_changed().unwrap();
        sut.set_theme(Theme::Dark);
        let after_change = receiver.has_changed().unwrap();

        // Assert
        assert!(!after_noop);
        assert!(after_change);
        assert_eq!(*receiver.borrow_and_update(), Theme::Dark);
    }
}
