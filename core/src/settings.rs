//! Design-system wide settings.

use alloc::{
    format,
    string::{String, ToString},
};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// The prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "cds";

/// Settings shared by every component of a design system.
///
/// Missing keys fall back to their defaults; unknown keys are rejected.
///
/// ```
/// use uishell_core::Settings;
///
/// let settings = Settings::from_json(r#"{ "prefix": "acme" }"#)?;
/// assert_eq!(settings.class("header__menu-item"), "acme--header__menu-item");
/// assert_eq!(settings.tag_name("header-nav-item"), "acme-header-nav-item");
/// # Ok::<(), uishell_core::SettingsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Prefix of element tag names and CSS classes.
    pub prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.into(),
        }
    }
}

impl Settings {
    /// Creates settings with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPrefix`] if the prefix cannot start a custom element name.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, SettingsError> {
        let settings = Self {
            prefix: prefix.into(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed input and
    /// [`SettingsError::InvalidPrefix`] for an unusable prefix.
    pub fn from_json(input: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(input).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the prefix can start a custom element name.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPrefix`] otherwise.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut chars = self.prefix.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(())
        } else {
            Err(SettingsError::InvalidPrefix(self.prefix.clone()))
        }
    }

    /// Prefixed CSS class for a block or element name.
    #[must_use]
    pub fn class(&self, name: &str) -> String {
        format!("{}--{name}", self.prefix)
    }

    /// Prefixed custom element tag name.
    #[must_use]
    pub fn tag_name(&self, tag: &str) -> String {
        format!("{}-{tag}", self.prefix)
    }
}
