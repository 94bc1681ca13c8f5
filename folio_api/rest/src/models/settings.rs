use folio_models::settings::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiTheme {
    Light,
    Dark,
}

impl From<Theme> for ApiTheme {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}

impl From<ApiTheme> for Theme {
    fn from(value: ApiTheme) -> Self {
        match value {
            ApiTheme::Light => Self::Light,
            ApiTheme::Dark => Self::Dark,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiSetThemeRequest {
    pub theme: ApiTheme,
}
