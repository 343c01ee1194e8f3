//! Header navigation item.
//!
//! One link in a header's top-level navigation list. The item knows nothing
//! about its siblings: the containing header decides which item is active and
//! sets the corresponding properties.

use alloc::{format, string::String};

use uishell_core::{
    ClassMap, CustomElement, Element, ElementError, FocusDelegating, Fragment, PropValue,
    PropertyDecl, PropertySchema, Settings, ShadowRootOptions, Slot,
};

/// The structural role every navigation item reports.
pub const ROLE: &str = "listitem";

/// `aria-current` value that suppresses the custom active style.
pub const ARIA_CURRENT_PAGE: &str = "page";

const STYLES: &str = include_str!("../styles/header-nav-item.css");

static SCHEMA: PropertySchema = PropertySchema::new(
    "header-nav-item",
    &[
        PropertyDecl::string("href", "href"),
        PropertyDecl::string("rel", "rel").reflect(),
        PropertyDecl::string("target", "target").reflect(),
        PropertyDecl::string("title", "title"),
        PropertyDecl::boolean("isActive", "is-active"),
        PropertyDecl::string("ariaCurrent", "aria-current"),
        PropertyDecl::string("role", "role").reflect(),
    ],
);

/// Whether an item shows the custom active style.
///
/// `aria-current="page"` takes precedence: the page indicator is already
/// conveyed by the accessibility attribute, so the item is not marked twice.
/// Any other `aria-current` value leaves the caller's `is_active` hint in
/// charge.
///
/// ```
/// use uishell_header::resolve_active_style;
///
/// assert!(resolve_active_style(true, None));
/// assert!(!resolve_active_style(true, Some("page")));
/// assert!(resolve_active_style(true, Some("step")));
/// ```
#[must_use]
pub fn resolve_active_style(is_active: bool, aria_current: Option<&str>) -> bool {
    is_active && aria_current != Some(ARIA_CURRENT_PAGE)
}

/// A link in the header's navigation list.
///
/// Rendered as
///
/// ```html
/// <a part="link" class="cds--header__menu-item" tabindex="0" href="/docs">
///   <span part="title" class="cds--text-truncate--end"><slot>Docs</slot></span>
/// </a>
/// ```
///
/// Nested content supplied by the host document replaces the title as the
/// visible label. The item must live inside a list; it always reports the
/// `listitem` role, and focusing it moves focus to the inner link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct HeaderNavItem {
    /// Link destination. Absent means the link has no `href`.
    pub href: Option<String>,
    /// Link relationship keywords.
    pub rel: Option<String>,
    /// Browsing context the link opens in.
    pub target: Option<String>,
    /// Label shown when no nested content is supplied.
    pub title: String,
    /// The containing header's hint that this is the current item.
    pub is_active: bool,
    /// Value of `aria-current`, conventionally `page` or absent.
    pub aria_current: Option<String>,
}

impl HeaderNavItem {
    /// Creates an item with the given title and no destination.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the link destination.
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Sets the link relationship.
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Sets the link target.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Marks the item as active.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets `aria-current`.
    pub fn aria_current(mut self, value: impl Into<String>) -> Self {
        self.aria_current = Some(value.into());
        self
    }

    /// The structural role, always `listitem`.
    #[must_use]
    pub const fn role(&self) -> &'static str {
        ROLE
    }

    /// Whether the custom active style applies.
    #[must_use]
    pub fn shows_active_style(&self) -> bool {
        resolve_active_style(self.is_active, self.aria_current.as_deref())
    }

    /// The component stylesheet, with class names and custom properties
    /// carrying the configured prefix.
    #[must_use]
    pub fn styles(settings: &Settings) -> String {
        STYLES.replace("cds-", &format!("{}-", settings.prefix))
    }
}

impl CustomElement for HeaderNavItem {
    const SHADOW_ROOT: ShadowRootOptions = ShadowRootOptions::OPEN.delegating_focus();

    fn schema() -> &'static PropertySchema {
        &SCHEMA
    }

    fn property(&self, name: &str) -> Result<PropValue, ElementError> {
        let decl = SCHEMA.property(name)?;
        Ok(match decl.name {
            "href" => self.href.as_deref().into(),
            "rel" => self.rel.as_deref().into(),
            "target" => self.target.as_deref().into(),
            "title" => self.title.as_str().into(),
            "isActive" => self.is_active.into(),
            "ariaCurrent" => self.aria_current.as_deref().into(),
            _ => ROLE.into(),
        })
    }

    fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), ElementError> {
        let decl = SCHEMA.property(name)?;
        match decl.name {
            "href" => self.href = value.into_string(decl.name)?,
            "rel" => self.rel = value.into_string(decl.name)?,
            "target" => self.target = value.into_string(decl.name)?,
            "title" => self.title = value.into_string(decl.name)?.unwrap_or_default(),
            "isActive" => self.is_active = value.into_bool(decl.name)?,
            "ariaCurrent" => self.aria_current = value.into_string(decl.name)?,
            _ => {
                let requested = value.into_string(decl.name)?;
                if requested.as_deref() != Some(ROLE) {
                    tracing::warn!(
                        element = SCHEMA.element(),
                        requested = ?requested,
                        "navigation items always have the listitem role; ignoring override"
                    );
                }
            }
        }
        Ok(())
    }

    fn render(&self, settings: &Settings) -> Fragment {
        let link_class = ClassMap::new()
            .with(settings.class("header__menu-item"), true)
            .with(
                settings.class("header__menu-item--current"),
                self.shows_active_style(),
            );

        Fragment::from(
            Element::new("a")
                .attr("part", "link")
                .attr("class", link_class)
                .attr("tabindex", "0")
                .attr_opt("href", self.href.as_deref())
                .attr_opt("rel", self.rel.as_deref())
                .attr_opt("target", self.target.as_deref())
                .child(
                    Element::new("span")
                        .attr("part", "title")
                        .attr("class", settings.class("text-truncate--end"))
                        .child(Slot::new().fallback(self.title.as_str())),
                ),
        )
    }
}

impl FocusDelegating for HeaderNavItem {}

/// Convenience constructor for a navigation item linking to `href`.
pub fn nav_item(title: impl Into<String>, href: impl Into<String>) -> HeaderNavItem {
    HeaderNavItem::new(title).href(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_style_truth_table() {
        assert!(resolve_active_style(true, None));
        assert!(!resolve_active_style(true, Some("page")));
        assert!(!resolve_active_style(false, Some("page")));
        assert!(!resolve_active_style(false, None));
    }

    #[test]
    fn only_the_page_value_suppresses() {
        for value in ["step", "date", "true", "location", "Page", ""] {
            assert!(resolve_active_style(true, Some(value)), "{value}");
            assert!(!resolve_active_style(false, Some(value)), "{value}");
        }
    }

    #[test]
    fn builder_sets_fields() {
        let item = nav_item("Docs", "/docs")
            .rel("noopener")
            .target("_blank")
            .active(true)
            .aria_current("page");
        assert_eq!(item.href.as_deref(), Some("/docs"));
        assert_eq!(item.rel.as_deref(), Some("noopener"));
        assert_eq!(item.target.as_deref(), Some("_blank"));
        assert_eq!(item.title, "Docs");
        assert!(item.is_active);
        assert!(!item.shows_active_style());
        assert_eq!(item.role(), "listitem");
    }

    #[test]
    fn properties_read_back() {
        let item = HeaderNavItem::new("Docs").active(true);
        assert_eq!(item.property("href"), Ok(PropValue::Absent));
        assert_eq!(item.property("title"), Ok(PropValue::from("Docs")));
        assert_eq!(item.property("isActive"), Ok(PropValue::Bool(true)));
        assert_eq!(item.property("role"), Ok(PropValue::from("listitem")));
        assert!(item.property("is-active").is_err());
    }

    #[test]
    fn absent_title_reads_as_empty() {
        let mut item = HeaderNavItem::new("Docs");
        item.set_property("title", PropValue::Absent).unwrap();
        assert_eq!(item.title, "");
    }

    #[test]
    fn styles_follow_the_prefix() {
        let styles = HeaderNavItem::styles(&Settings::with_prefix("acme").unwrap());
        assert!(styles.contains(".acme--header__menu-item--current"));
        assert!(styles.contains("var(--acme-text-primary"));
        assert!(!styles.contains("cds-"));
        assert!(styles.contains("text-overflow: ellipsis"));
    }
}
