#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

pub mod prelude {
    //! A collection of commonly used traits and types for easy importing.
    //!
    //! # Example
    //!
    //! ```rust
    //! use uishell::prelude::*;
    //!
    //! let host = ElementHost::new(nav_item("Docs", "/docs"));
    //! assert_eq!(host.tag_name(), "cds-header-nav-item");
    //! ```
    pub use super::base::{
        CustomElement, Element, ElementHost, FocusDelegating, Fragment, Node, Settings,
    };
    pub use super::header::{HeaderNavItem, nav_item, resolve_active_style};
}

pub use uishell_core as base;
pub use uishell_header as header;

#[doc(inline)]
pub use uishell_core::{ElementError, SettingsError};

pub use tracing as log;
