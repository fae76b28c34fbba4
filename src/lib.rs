//! Password form helper library
//!
//! Scores password strength against tiered complexity rules, paints a
//! strength bar, keeps a confirmation field's validity in sync with the
//! password field and toggles masked/clear-text display.
//!
//! Document side effects go through small port traits ([`StrengthBar`],
//! [`ValidatedField`], [`FeedbackText`], [`MaskableField`], [`ToggleIcon`]);
//! [`dom::Document`] implements all of them for an in-memory element tree.
//!
//! # Features
//!
//! - `async` (default): Enables debounced async evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! `CheckerConfig::from_env` reads selector overrides from
//! `PWD_CHECKER_GROUP`, `PWD_CHECKER_INPUT`, `PWD_CHECKER_CONFIRM`,
//! `PWD_CHECKER_TOGGLE` and `PWD_CHECKER_BAR`.
//!
//! # Example
//!
//! ```rust
//! use pwd_checker::{CheckerConfig, Document, PasswordChecker};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let form = doc.append(root, "form", &[("class", "needs-validation")]).unwrap();
//! let group = doc.append(form, "div", &[("class", "password-group")]).unwrap();
//! let input = doc
//!     .append(group, "input", &[("id", "password-input"), ("type", "password")])
//!     .unwrap();
//! let bar = doc.append(group, "div", &[("id", "password-strength-bar")]).unwrap();
//!
//! let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
//! checker.input(&mut doc, input, "Password1!").unwrap();
//!
//! assert_eq!(doc.element(bar).unwrap().text(), "Strong");
//! ```

mod classifier;
mod config;
pub mod dom;
mod error;
mod evaluator;
mod indicator;
mod matcher;
mod visibility;
mod wiring;

// Public API
pub use classifier::{classify, classify_secret, StrengthCategory, SYMBOLS};
pub use config::{CheckerConfig, Selector, Selectors};
pub use dom::{Document, Element, NodeId};
pub use error::CheckerError;
pub use evaluator::{evaluate_password_strength, Evaluation};
pub use indicator::{apply_indicator, level_for, presentation, StrengthBar, Tier, VALUE_ATTRIBUTE};
pub use matcher::{
    validate_match, FeedbackText, MatchOutcome, ValidatedField, MISMATCH_MESSAGE,
    MISSING_PASSWORD_MESSAGE,
};
pub use visibility::{
    toggle_visibility, MaskableField, ToggleIcon, Visibility, ICON_CLEAR, ICON_MASKED,
};
pub use wiring::{EventKind, PasswordChecker, PasswordGroup};

#[cfg(feature = "async")]
pub use evaluator::{evaluate_password_strength_tx, DEBOUNCE};
