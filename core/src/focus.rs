//! Focus delegation from an element host into its rendered fragment.

use crate::{
    element::CustomElement,
    markup::{Element, Fragment},
};

/// Structural options of a component's shadow tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowRootOptions {
    /// Whether focusing the host moves focus to the first focusable element inside.
    pub delegates_focus: bool,
}

impl ShadowRootOptions {
    /// An open shadow root without focus delegation.
    pub const OPEN: Self = Self {
        delegates_focus: false,
    };

    /// Enables focus delegation.
    #[must_use]
    pub const fn delegating_focus(mut self) -> Self {
        self.delegates_focus = true;
        self
    }
}

/// Forwards focus on the host to an interactive element of the render.
///
/// Components opt in by implementing this trait and declaring
/// `ShadowRootOptions::OPEN.delegating_focus()` as their shadow root. The
/// default target is the first focusable element in tree order.
pub trait FocusDelegating: CustomElement {
    /// The element that receives focus when the host is focused.
    fn focus_target(fragment: &Fragment) -> Option<&Element> {
        fragment.find(is_focusable)
    }
}

/// Whether an element takes focus: a link with a destination, a form control,
/// or anything with a non-negative `tabindex`.
#[must_use]
pub fn is_focusable(element: &Element) -> bool {
    if let Some(index) = element.attribute("tabindex") {
        return index.trim().parse::<i32>().is_ok_and(|i| i >= 0);
    }
    match element.tag() {
        "a" | "area" => element.has_attribute("href"),
        "button" | "input" | "select" | "textarea" => !element.has_attribute("disabled"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_need_a_destination() {
        assert!(!is_focusable(&Element::new("a")));
        assert!(is_focusable(&Element::new("a").attr("href", "#")));
    }

    #[test]
    fn tabindex_overrides_native_focusability() {
        assert!(is_focusable(&Element::new("a").attr("tabindex", "0")));
        assert!(is_focusable(&Element::new("span").attr("tabindex", "2")));
        assert!(!is_focusable(
            &Element::new("button").attr("tabindex", "-1")
        ));
        assert!(!is_focusable(&Element::new("div").attr("tabindex", "x")));
    }

    #[test]
    fn disabled_controls_are_skipped() {
        assert!(is_focusable(&Element::new("button")));
        assert!(!is_focusable(&Element::new("button").attr("disabled", "")));
    }

    #[test]
    fn delegation_is_opt_in() {
        assert!(!ShadowRootOptions::OPEN.delegates_focus);
        assert!(ShadowRootOptions::OPEN.delegating_focus().delegates_focus);
        assert_eq!(ShadowRootOptions::default(), ShadowRootOptions::OPEN);
    }
}
