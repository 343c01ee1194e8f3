#![no_std]

//! Header shell components.
//!
//! The crate provides the items a site header is made of. Each component is a
//! [`CustomElement`](uishell_core::CustomElement): a plain view-model that a
//! containing header configures and an [`ElementHost`](uishell_core::ElementHost)
//! renders.
extern crate alloc;

pub mod nav_item;

pub use nav_item::{HeaderNavItem, nav_item, resolve_active_style};
