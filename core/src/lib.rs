#![no_std]
//! Core building blocks for `uishell` components.
//!
//! A component is a plain value implementing [`CustomElement`]. It declares its
//! observed properties as a static [`PropertySchema`] and renders itself into a
//! [`Fragment`] of markup. An [`ElementHost`] plays the role of the registered
//! element: it stores the properties in a reactive binding, converts host
//! attributes through the schema, and re-renders once per committed batch.
//!
//! ```
//! use uishell_core::markup::{Element, Fragment};
//!
//! let fragment = Fragment::from(Element::new("a").attr_opt("href", None::<&str>));
//! assert_eq!(fragment.to_string(), "<a></a>");
//! ```

extern crate alloc;

pub mod element;
pub mod error;
pub mod focus;
pub mod markup;
pub mod props;
pub mod settings;

pub use element::{CustomElement, ElementHost};
pub use error::{ElementError, SettingsError};
pub use focus::{FocusDelegating, ShadowRootOptions};
pub use markup::{ClassMap, Element, Fragment, Node, Slot};
pub use props::{PropKind, PropValue, PropertyDecl, PropertySchema};
pub use settings::Settings;
