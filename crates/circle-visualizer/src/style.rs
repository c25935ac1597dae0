use crate::gradient::Gradient;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[strum(serialize = "butt", serialize = "0")]
    Butt,
    #[default]
    #[strum(serialize = "round", serialize = "1")]
    Round,
    #[strum(serialize = "square", serialize = "2")]
    Square,
}

impl From<LineCap> for cairo::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        }
    }
}

/// Everything about a visualizer that applies to all spokes at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub line_count: usize,
    pub max_length: f64,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub gradient: Gradient,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_count: 64,
            max_length: 30.0,
            line_width: 3.0,
            line_cap: LineCap::default(),
            gradient: Gradient::default(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Line count must be at least 1")]
    ZeroLineCount,
    #[error("Invalid maximum length: {0}")]
    MaxLength(f64),
    #[error("Invalid line width: {0}")]
    LineWidth(f64),
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.line_count == 0 {
            return Err(SettingsError::ZeroLineCount);
        }
        if !self.max_length.is_finite() || self.max_length < 0.0 {
            return Err(SettingsError::MaxLength(self.max_length));
        }
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            return Err(SettingsError::LineWidth(self.line_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_cap_deserialization() {
        let cases = vec![
            ("\"butt\"", LineCap::Butt),
            ("\"Butt\"", LineCap::Butt),
            ("\"0\"", LineCap::Butt),
            ("\"ROUND\"", LineCap::Round),
            ("\"1\"", LineCap::Round),
            ("\"square\"", LineCap::Square),
            ("\"2\"", LineCap::Square),
        ];

        for (json, expected) in cases {
            let deserialized: LineCap = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_line_cap_rejects_unknown() {
        assert!(serde_json::from_str::<LineCap>("\"bevel\"").is_err());
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.line_count, 64);
        assert_eq!(settings.max_length, 30.0);
        assert_eq!(settings.line_width, 3.0);
        assert_eq!(settings.line_cap, LineCap::Round);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let zero = Settings {
            line_count: 0,
            ..Settings::default()
        };
        assert_eq!(zero.validate(), Err(SettingsError::ZeroLineCount));

        let negative = Settings {
            max_length: -1.0,
            ..Settings::default()
        };
        assert_eq!(negative.validate(), Err(SettingsError::MaxLength(-1.0)));

        let nan = Settings {
            line_width: f64::NAN,
            ..Settings::default()
        };
        assert!(matches!(nan.validate(), Err(SettingsError::LineWidth(_))));
    }
}
