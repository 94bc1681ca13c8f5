use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color theme of the website.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme {0:?}, expected \"light\" or \"dark\"")]
pub struct InvalidThemeError(pub String);

impl FromStr for Theme {
    type Err = InvalidThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(InvalidThemeError(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn parse() {
        assert_eq!("dark".parse(), Ok(Theme::Dark));
        assert_eq!("light".parse(), Ok(Theme::Light));
        assert_eq!(
            "Dark".parse::<Theme>().unwrap_err().to_string(),
            "invalid theme \"Dark\", expected \"light\" or \"dark\""
        );
    }

    #[test]
    fn serde() {
        assert_eq!(serde_json::to_value(Theme::Dark).unwrap(), "dark");
        assert_eq!(
            serde_json::from_value::<Theme>(serde_json::json!("light")).unwrap(),
            Theme::Light
        );
    }
}
