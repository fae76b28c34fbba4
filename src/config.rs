//! Checker configuration: the selectors used to locate each password group
//! and the marker classes that switch behavior on.

use std::fmt;
use std::str::FromStr;

use crate::error::CheckerError;

/// A simple `.class` or `#id` selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Class(String),
    Id(String),
}

impl FromStr for Selector {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid_name = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        };
        match s.split_at_checked(1) {
            Some((".", name)) if valid_name(name) => Ok(Selector::Class(name.to_string())),
            Some(("#", name)) if valid_name(name) => Ok(Selector::Id(name.to_string())),
            _ => Err(CheckerError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub group: Selector,
    pub password: Selector,
    pub confirm: Selector,
    pub toggle: Selector,
    pub strength_bar: Selector,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            group: Selector::Class("password-group".to_string()),
            password: Selector::Id("password-input".to_string()),
            confirm: Selector::Id("password-confirm".to_string()),
            toggle: Selector::Id("visibility-btn".to_string()),
            strength_bar: Selector::Id("password-strength-bar".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub selectors: Selectors,
    /// Class on a form that opts into client-side match validation.
    pub validation_marker: String,
    /// Class identifying the feedback element following the confirm field.
    pub feedback_marker: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            validation_marker: "needs-validation".to_string(),
            feedback_marker: "invalid-feedback".to_string(),
        }
    }
}

impl CheckerConfig {
    /// Default configuration with selectors overridden from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `PWD_CHECKER_GROUP`
    /// - `PWD_CHECKER_INPUT`
    /// - `PWD_CHECKER_CONFIRM`
    /// - `PWD_CHECKER_TOGGLE`
    /// - `PWD_CHECKER_BAR`
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::InvalidSelector` if a variable is set to
    /// something other than a `.class` or `#id` selector.
    pub fn from_env() -> Result<Self, CheckerError> {
        let mut config = Self::default();
        let selectors = &mut config.selectors;
        for (key, slot) in [
            ("PWD_CHECKER_GROUP", &mut selectors.group),
            ("PWD_CHECKER_INPUT", &mut selectors.password),
            ("PWD_CHECKER_CONFIRM", &mut selectors.confirm),
            ("PWD_CHECKER_TOGGLE", &mut selectors.toggle),
            ("PWD_CHECKER_BAR", &mut selectors.strength_bar),
        ] {
            if let Ok(value) = std::env::var(key) {
                *slot = value.parse()?;
                #[cfg(feature = "tracing")]
                tracing::debug!("Selector override {} = {}", key, slot);
            }
        }
        Ok(config)
    }
}
