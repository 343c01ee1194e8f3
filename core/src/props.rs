//! Observed property declarations.
//!
//! Each component describes its public properties as a static
//! [`PropertySchema`]: the property name, the host attribute it is observed
//! through, its value kind, and whether the property is reflected back onto the
//! host attribute.

use alloc::string::String;
use core::fmt;

use crate::error::ElementError;

/// The value kind of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// A string property; a removed attribute makes it absent.
    String,
    /// A boolean property; attribute presence means `true`.
    Boolean,
}

impl PropKind {
    /// Converts a host attribute value into a property value.
    ///
    /// `None` means the attribute was removed.
    #[must_use]
    pub fn from_attribute(self, value: Option<&str>) -> PropValue {
        match (self, value) {
            (Self::Boolean, value) => PropValue::Bool(value.is_some()),
            (Self::String, Some(value)) => PropValue::Str(value.into()),
            (Self::String, None) => PropValue::Absent,
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        })
    }
}

/// A dynamically typed property value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PropValue {
    /// No value.
    #[default]
    Absent,
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
}

impl PropValue {
    /// The attribute value this property reflects to, `None` to remove the attribute.
    #[must_use]
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            Self::Absent | Self::Bool(false) => None,
            Self::Bool(true) => Some(String::new()),
            Self::Str(value) => Some(value.clone()),
        }
    }

    /// Interprets the value as an optional string.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::TypeMismatch`] for boolean values.
    pub fn into_string(self, property: &'static str) -> Result<Option<String>, ElementError> {
        match self {
            Self::Absent => Ok(None),
            Self::Str(value) => Ok(Some(value)),
            Self::Bool(_) => Err(ElementError::TypeMismatch {
                property,
                expected: PropKind::String,
            }),
        }
    }

    /// Interprets the value as a boolean; absent reads as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::TypeMismatch`] for string values.
    pub fn into_bool(self, property: &'static str) -> Result<bool, ElementError> {
        match self {
            Self::Absent => Ok(false),
            Self::Bool(value) => Ok(value),
            Self::Str(_) => Err(ElementError::TypeMismatch {
                property,
                expected: PropKind::Boolean,
            }),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Declaration of one observed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Property name, as used by [`ElementHost::set_property`](crate::ElementHost::set_property).
    pub name: &'static str,
    /// Lowercase host attribute name.
    pub attribute: &'static str,
    /// Value kind.
    pub kind: PropKind,
    /// Whether the property is written back to the host attribute.
    pub reflect: bool,
}

impl PropertyDecl {
    /// Declares a string property.
    #[must_use]
    pub const fn string(name: &'static str, attribute: &'static str) -> Self {
        Self {
            name,
            attribute,
            kind: PropKind::String,
            reflect: false,
        }
    }

    /// Declares a boolean property.
    #[must_use]
    pub const fn boolean(name: &'static str, attribute: &'static str) -> Self {
        Self {
            name,
            attribute,
            kind: PropKind::Boolean,
            reflect: false,
        }
    }

    /// Marks the property as reflected to its host attribute.
    #[must_use]
    pub const fn reflect(mut self) -> Self {
        self.reflect = true;
        self
    }
}

/// The static property table of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
    element: &'static str,
    properties: &'static [PropertyDecl],
}

impl PropertySchema {
    /// Creates a schema for the element with the given unprefixed tag.
    #[must_use]
    pub const fn new(element: &'static str, properties: &'static [PropertyDecl]) -> Self {
        Self {
            element,
            properties,
        }
    }

    /// Unprefixed tag of the element.
    #[must_use]
    pub const fn element(&self) -> &'static str {
        self.element
    }

    /// All declared properties.
    #[must_use]
    pub const fn properties(&self) -> &'static [PropertyDecl] {
        self.properties
    }

    /// Looks up a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownProperty`] when no such property is declared.
    pub fn property(&self, name: &str) -> Result<&'static PropertyDecl, ElementError> {
        self.properties
            .iter()
            .find(|decl| decl.name == name)
            .ok_or_else(|| ElementError::UnknownProperty {
                element: self.element,
                name: name.into(),
            })
    }

    /// Looks up the property observed through a host attribute.
    ///
    /// HTML attribute names are case-insensitive, so is this lookup.
    #[must_use]
    pub fn by_attribute(&self, attribute: &str) -> Option<&'static PropertyDecl> {
        self.properties
            .iter()
            .find(|decl| decl.attribute.eq_ignore_ascii_case(attribute))
    }

    /// Properties reflected to host attributes.
    pub fn reflected(&self) -> impl Iterator<Item = &'static PropertyDecl> {
        self.properties.iter().filter(|decl| decl.reflect)
    }
}
