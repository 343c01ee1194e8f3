//! Markup fragments produced by component renderers.
//!
//! The model is deliberately small: elements with ordered attributes, text, and
//! slots. A [`Fragment`] is what a component's shadow tree looks like after a
//! render; [`Fragment::assign_slots`] composes it with the host's light children
//! into the tree a user actually sees.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write};

/// A single node in a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
    /// An insertion point for light children.
    Slot(Slot),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// For a slot this is the text of its fallback content.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => element
                .children
                .iter()
                .for_each(|child| child.collect_text(out)),
            Self::Slot(slot) => slot
                .fallback
                .iter()
                .for_each(|child| child.collect_text(out)),
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<Slot> for Node {
    fn from(value: Slot) -> Self {
        Self::Slot(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value with the same name.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    /// Sets an attribute only when a value is present.
    ///
    /// An absent value leaves the attribute out entirely; it is never written
    /// as an empty string.
    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// The tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the value of an attribute, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present, regardless of its value.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    fn find<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
        if predicate(self) {
            return Some(self);
        }
        find_in(&self.children, predicate)
    }
}

fn find_in<'a>(nodes: &'a [Node], predicate: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
    nodes.iter().find_map(|node| match node {
        Node::Element(element) => element.find(predicate),
        Node::Slot(slot) => find_in(&slot.fallback, predicate),
        Node::Text(_) => None,
    })
}

/// An insertion point for the host's light children.
///
/// When nothing is assigned to the slot, its fallback content is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    name: Option<String>,
    fallback: Vec<Node>,
}

impl Slot {
    /// Creates the default (unnamed) slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            fallback: Vec::new(),
        }
    }

    /// Creates a named slot.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fallback: Vec::new(),
        }
    }

    /// Appends fallback content.
    #[must_use]
    pub fn fallback(mut self, node: impl Into<Node>) -> Self {
        self.fallback.push(node.into());
        self
    }

    fn accepts(&self, node: &Node) -> bool {
        let target = match node {
            Node::Element(element) => element.attribute("slot"),
            _ => None,
        };
        target == self.name.as_deref()
    }
}

/// Builds a `class` attribute from a set of conditional class names.
///
/// ```
/// use uishell_core::ClassMap;
///
/// let classes = ClassMap::new().with("item", true).with("item--current", false);
/// assert_eq!(classes.to_string(), "item");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap(Vec<(String, bool)>);

impl ClassMap {
    /// Creates an empty class map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a class that is emitted only when `enabled` is true.
    #[must_use]
    pub fn with(mut self, class: impl Into<String>, enabled: bool) -> Self {
        self.0.push((class.into(), enabled));
        self
    }
}

impl fmt::Display for ClassMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (class, _) in self.0.iter().filter(|(_, enabled)| *enabled) {
            if !first {
                f.write_char(' ')?;
            }
            f.write_str(class)?;
            first = false;
        }
        Ok(())
    }
}

impl From<ClassMap> for String {
    fn from(value: ClassMap) -> Self {
        value.to_string()
    }
}

/// An ordered list of nodes, the output of a render.
///
/// `Display` serializes the fragment to HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Vec<Node>);

impl Fragment {
    /// Creates an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// First element, in tree order, matching `predicate`.
    #[must_use]
    pub fn find(&self, predicate: impl Fn(&Element) -> bool) -> Option<&Element> {
        find_in(&self.0, &predicate)
    }

    /// Element exposing the given `part` name.
    #[must_use]
    pub fn find_part(&self, part: &str) -> Option<&Element> {
        self.find(|element| {
            element
                .attribute("part")
                .is_some_and(|parts| parts.split_ascii_whitespace().any(|p| p == part))
        })
    }

    /// Concatenated text of all nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.collect_text(&mut out);
        }
        out
    }

    /// Composes this shadow fragment with the host's light children.
    ///
    /// Every slot is replaced by the light nodes assigned to it, or by its
    /// fallback when none are. Whitespace-only text never counts as assigned
    /// content.
    #[must_use]
    pub fn assign_slots(&self, light: &[Node]) -> Self {
        Self(compose(&self.0, light))
    }
}

fn compose(nodes: &[Node], light: &[Node]) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Element(element) => {
                let mut element = element.clone();
                element.children = compose(&element.children, light);
                out.push(Node::Element(element));
            }
            Node::Slot(slot) => {
                let assigned: Vec<&Node> = light.iter().filter(|n| slot.accepts(n)).collect();
                if assigned.iter().all(|n| n.is_blank_text()) {
                    out.extend(compose(&slot.fallback, light));
                } else {
                    out.extend(assigned.into_iter().cloned());
                }
            }
            Node::Text(_) => out.push(node.clone()),
        }
    }
    out
}

impl From<Node> for Fragment {
    fn from(value: Node) -> Self {
        Self(alloc::vec![value])
    }
}

impl From<Element> for Fragment {
    fn from(value: Element) -> Self {
        Self::from(Node::from(value))
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|node| write_node(f, node))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match node {
        Node::Text(text) => write_escaped(f, text, false),
        Node::Element(element) => {
            write!(f, "<{}", element.tag)?;
            for (name, value) in &element.attributes {
                write!(f, " {name}=\"")?;
                write_escaped(f, value, true)?;
                f.write_char('"')?;
            }
            f.write_char('>')?;
            element
                .children
                .iter()
                .try_for_each(|child| write_node(f, child))?;
            write!(f, "</{}>", element.tag)
        }
        Node::Slot(slot) => {
            f.write_str("<slot")?;
            if let Some(name) = &slot.name {
                f.write_str(" name=\"")?;
                write_escaped(f, name, true)?;
                f.write_char('"')?;
            }
            f.write_char('>')?;
            slot.fallback
                .iter()
                .try_for_each(|child| write_node(f, child))?;
            f.write_str("</slot>")
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str, attribute: bool) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' if !attribute => f.write_str("&gt;")?,
            '"' if attribute => f.write_str("&quot;")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn link() -> Element {
        Element::new("a")
            .attr("part", "link")
            .attr("class", "item item--current")
            .child(
                Element::new("span")
                    .attr("part", "title")
                    .child(Slot::new().fallback("Docs")),
            )
    }

    #[test]
    fn absent_attribute_is_omitted() {
        let element = Element::new("a")
            .attr_opt("href", None::<&str>)
            .attr_opt("rel", Some("noopener"));
        assert!(!element.has_attribute("href"));
        assert_eq!(element.attribute("rel"), Some("noopener"));
        assert_eq!(Fragment::from(element).to_string(), r#"<a rel="noopener"></a>"#);
    }

    #[test]
    fn attr_replaces_previous_value() {
        let element = Element::new("a").attr("href", "/a").attr("href", "/b");
        assert_eq!(element.attributes().count(), 1);
        assert_eq!(element.attribute("href"), Some("/b"));
    }

    #[test]
    fn serializes_with_escaping() {
        let fragment = Fragment::from(
            Element::new("a")
                .attr("href", "/search?q=\"rust\"&page=1")
                .child("Fish & <Chips>"),
        );
        assert_eq!(
            fragment.to_string(),
            r#"<a href="/search?q=&quot;rust&quot;&amp;page=1">Fish &amp; &lt;Chips&gt;</a>"#
        );
    }

    #[test]
    fn serializes_slots() {
        let fragment = Fragment::from(link());
        assert_eq!(
            fragment.to_string(),
            r#"<a part="link" class="item item--current"><span part="title"><slot>Docs</slot></span></a>"#
        );
    }

    #[test]
    fn class_map_skips_disabled_classes() {
        let classes = ClassMap::new()
            .with("a", false)
            .with("b", true)
            .with("c", true);
        assert_eq!(classes.to_string(), "b c");
        assert_eq!(ClassMap::new().with("a", false).to_string(), "");
    }

    #[test]
    fn class_queries() {
        let element = link();
        assert!(element.has_class("item--current"));
        assert!(!element.has_class("item--"));
        assert_eq!(element.classes().count(), 2);
    }

    #[test]
    fn find_part_searches_descendants() {
        let fragment = Fragment::from(link());
        assert_eq!(fragment.find_part("link").map(Element::tag), Some("a"));
        assert_eq!(fragment.find_part("title").map(Element::tag), Some("span"));
        assert!(fragment.find_part("icon").is_none());
    }

    #[test]
    fn slot_falls_back_without_light_children() {
        let composed = Fragment::from(link()).assign_slots(&[]);
        assert_eq!(composed.text_content(), "Docs");
        assert!(!composed.to_string().contains("<slot"));
    }

    #[test]
    fn slot_ignores_whitespace_only_text() {
        let composed = Fragment::from(link()).assign_slots(&[Node::text("\n   ")]);
        assert_eq!(composed.text_content(), "Docs");
    }

    #[test]
    fn slot_takes_light_children() {
        let light = vec![
            Node::from(Element::new("svg").attr("aria-hidden", "true")),
            Node::text("Guides"),
        ];
        let composed = Fragment::from(link()).assign_slots(&light);
        assert_eq!(composed.text_content(), "Guides");
        let title = composed.find_part("title").expect("title part");
        assert_eq!(title.children().len(), 2);
        assert_eq!(title.children()[0].as_element().map(Element::tag), Some("svg"));
    }

    #[test]
    fn named_slots_only_take_matching_children() {
        let fragment = Fragment::from(
            Element::new("div")
                .child(Slot::named("icon").fallback("*"))
                .child(Slot::new().fallback("label")),
        );
        let light = vec![Node::from(
            Element::new("i").attr("slot", "icon").child("+"),
        )];
        let composed = fragment.assign_slots(&light);
        assert_eq!(composed.text_content(), "+label");
    }
}
