//! Error types shared by `uishell` components.

use alloc::string::String;

use crate::props::PropKind;

/// Error returned by the programmatic property API of an [`ElementHost`](crate::ElementHost).
///
/// Rendering itself never fails; only property assignment through the schema does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// The element does not declare a property with this name.
    #[error("`{element}` has no property named `{name}`")]
    UnknownProperty {
        /// Tag of the element, without prefix.
        element: &'static str,
        /// The requested property name.
        name: String,
    },
    /// The value kind does not match the declared property kind.
    #[error("property `{property}` expects a {expected} value")]
    TypeMismatch {
        /// The declared property name.
        property: &'static str,
        /// The kind declared in the schema.
        expected: PropKind,
    },
}

/// Error returned when loading [`Settings`](crate::Settings).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The input is not valid settings JSON.
    #[error("invalid settings: {0}")]
    Parse(String),
    /// The prefix cannot start a custom element name.
    #[error("invalid prefix `{0}`: expected lowercase ASCII letters, digits or `-`, starting with a letter")]
    InvalidPrefix(String),
}
