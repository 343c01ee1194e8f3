//! Element hosts: reactive property storage and batched re-rendering.
//!
//! An [`ElementHost`] stands in for a registered custom element. Its
//! properties live in a [`nami::Binding`]; a single watcher renders the
//! component whenever a new value is committed. Every host mutation collects
//! its changes first and commits them as one value, so a render never sees a
//! partially applied batch.

use alloc::{
    collections::BTreeMap,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};
use core::{
    cell::{Cell, RefCell},
    fmt,
};

use nami::{Binding, Signal, binding};

use crate::{
    error::ElementError,
    focus::{FocusDelegating, ShadowRootOptions},
    markup::{Element, Fragment, Node},
    props::{PropValue, PropertySchema},
    settings::Settings,
};

/// A component that can be hosted by an [`ElementHost`].
///
/// Implementors are plain view-models: the host owns them, and only the host's
/// caller mutates them.
pub trait CustomElement: Clone + PartialEq + fmt::Debug + 'static {
    /// Structural options of the component's shadow tree.
    const SHADOW_ROOT: ShadowRootOptions = ShadowRootOptions::OPEN;

    /// The observed properties of the component.
    fn schema() -> &'static PropertySchema;

    /// Reads a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownProperty`] for undeclared names.
    fn property(&self, name: &str) -> Result<PropValue, ElementError>;

    /// Writes a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownProperty`] for undeclared names and
    /// [`ElementError::TypeMismatch`] for values of the wrong kind.
    fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), ElementError>;

    /// Renders the shadow tree. Must be pure.
    fn render(&self, settings: &Settings) -> Fragment;
}

type RenderListener = Rc<dyn Fn(&Fragment)>;

#[derive(Default)]
struct RenderState {
    fragment: RefCell<Fragment>,
    renders: Cell<usize>,
    listeners: RefCell<Vec<RenderListener>>,
}

impl RenderState {
    // No borrow is held while listeners run, so they may read the host,
    // commit further batches and register listeners.
    fn commit(&self, fragment: Fragment) {
        *self.fragment.borrow_mut() = fragment.clone();
        self.renders.set(self.renders.get() + 1);
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(&fragment);
        }
    }
}

/// Hosts a [`CustomElement`] the way a document hosts a registered element.
///
/// ```
/// # use uishell_core::{CustomElement, ElementError, ElementHost, Fragment, Element};
/// # use uishell_core::{PropValue, PropertyDecl, PropertySchema, Settings};
/// #[derive(Debug, Clone, PartialEq, Default)]
/// struct Tag { label: String }
///
/// static SCHEMA: PropertySchema =
///     PropertySchema::new("tag", &[PropertyDecl::string("label", "label")]);
///
/// impl CustomElement for Tag {
///     fn schema() -> &'static PropertySchema { &SCHEMA }
///     fn property(&self, name: &str) -> Result<PropValue, ElementError> {
///         SCHEMA.property(name)?;
///         Ok(self.label.as_str().into())
///     }
///     fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), ElementError> {
///         let decl = SCHEMA.property(name)?;
///         self.label = value.into_string(decl.name)?.unwrap_or_default();
///         Ok(())
///     }
///     fn render(&self, _settings: &Settings) -> Fragment {
///         Fragment::from(Element::new("span").child(self.label.as_str()))
///     }
/// }
///
/// let mut host = ElementHost::new(Tag::default());
/// host.set_attribute("label", "new")?;
/// assert_eq!(host.fragment().to_string(), "<span>new</span>");
/// assert_eq!(host.render_count(), 2);
/// # Ok::<(), ElementError>(())
/// ```
pub struct ElementHost<E: CustomElement> {
    settings: Settings,
    props: Binding<E>,
    state: Rc<RenderState>,
    committing: Cell<bool>,
    pending: RefCell<Option<E>>,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    _watcher: <Binding<E> as Signal>::Guard,
}

impl<E: CustomElement> fmt::Debug for ElementHost<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHost")
            .field("tag", &self.tag_name())
            .field("element", &self.element())
            .field("attributes", &self.attributes)
            .field("renders", &self.state.renders.get())
            .finish_non_exhaustive()
    }
}

impl<E: CustomElement> ElementHost<E> {
    /// Hosts `element` with the default [`Settings`] and performs the first render.
    pub fn new(element: E) -> Self {
        Self::with_settings(element, Settings::default())
    }

    /// Hosts `element` with the given settings and performs the first render.
    pub fn with_settings(element: E, settings: Settings) -> Self {
        let state = Rc::new(RenderState::default());
        state.commit(element.render(&settings));

        let props: Binding<E> = binding(element);
        let watcher = {
            let state = Rc::clone(&state);
            let settings = settings.clone();
            props.watch(move |context| {
                let element: E = context.into_value();
                state.commit(element.render(&settings));
                tracing::trace!(
                    element = E::schema().element(),
                    renders = state.renders.get(),
                    "rendered"
                );
            })
        };

        Self {
            settings,
            props,
            state,
            committing: Cell::new(false),
            pending: RefCell::new(None),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            _watcher: watcher,
        }
    }

    /// The settings this host renders with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The prefixed tag name of the hosted element.
    #[must_use]
    pub fn tag_name(&self) -> String {
        self.settings.tag_name(E::schema().element())
    }

    /// A snapshot of the current property values.
    ///
    /// Inside a render listener this includes batches committed by listeners
    /// that have not rendered yet.
    #[must_use]
    pub fn element(&self) -> E {
        let pending = self.pending.borrow().clone();
        pending.unwrap_or_else(|| self.props.get())
    }

    /// Applies any number of changes as one batch.
    ///
    /// Returns whether the batch changed anything; only then is the element
    /// re-rendered, exactly once.
    pub fn update(&self, apply: impl FnOnce(&mut E)) -> bool {
        let current = self.element();
        let mut next = current.clone();
        apply(&mut next);
        self.commit(&current, next)
    }

    /// Applies a fallible batch. On error nothing is committed.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `apply`.
    pub fn try_update(
        &self,
        apply: impl FnOnce(&mut E) -> Result<(), ElementError>,
    ) -> Result<bool, ElementError> {
        let current = self.element();
        let mut next = current.clone();
        apply(&mut next)?;
        Ok(self.commit(&current, next))
    }

    // A batch committed while a render is being dispatched is queued and
    // rendered once the outer render returns.
    fn commit(&self, current: &E, next: E) -> bool {
        if *current == next {
            return false;
        }
        if self.committing.get() {
            *self.pending.borrow_mut() = Some(next);
            return true;
        }
        self.committing.set(true);
        self.props.set(next);
        loop {
            let queued = self.pending.borrow_mut().take();
            let Some(next) = queued else { break };
            self.props.set(next);
        }
        self.committing.set(false);
        true
    }

    /// Reads a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownProperty`] for undeclared names.
    pub fn property(&self, name: &str) -> Result<PropValue, ElementError> {
        self.element().property(name)
    }

    /// Writes a single property by name.
    ///
    /// # Errors
    ///
    /// See [`CustomElement::set_property`].
    pub fn set_property(
        &self,
        name: &str,
        value: impl Into<PropValue>,
    ) -> Result<bool, ElementError> {
        let value = value.into();
        self.try_update(|element| element.set_property(name, value))
    }

    /// Sets a host attribute.
    ///
    /// # Errors
    ///
    /// See [`ElementHost::apply_attributes`].
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ElementError> {
        self.apply_attributes([(name, Some(value))])
    }

    /// Removes a host attribute.
    ///
    /// # Errors
    ///
    /// See [`ElementHost::apply_attributes`].
    pub fn remove_attribute(&mut self, name: &str) -> Result<bool, ElementError> {
        self.apply_attributes([(name, None)])
    }

    /// Sets (`Some`) or removes (`None`) several host attributes as one batch.
    ///
    /// Observed attributes are converted through the schema and committed
    /// together. Unobserved attributes are only stored on the host.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CustomElement::set_property`]; in that case no
    /// property change is committed.
    pub fn apply_attributes<'a>(
        &mut self,
        changes: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    ) -> Result<bool, ElementError> {
        let schema = E::schema();
        let mut observed = Vec::new();
        for (name, value) in changes {
            let name = name.to_ascii_lowercase();
            if let Some(decl) = schema.by_attribute(&name) {
                observed.push((decl, decl.kind.from_attribute(value)));
            } else {
                tracing::debug!(
                    element = schema.element(),
                    attribute = %name,
                    "attribute is not observed"
                );
            }
            match value {
                Some(value) => {
                    self.attributes.insert(name, value.to_string());
                }
                None => {
                    self.attributes.remove(&name);
                }
            }
        }

        if observed.is_empty() {
            return Ok(false);
        }
        self.try_update(|element| {
            observed
                .into_iter()
                .try_for_each(|(decl, value)| element.set_property(decl.name, value))
        })
    }

    /// Attributes as they appear on the host: caller-set attributes overlaid
    /// with reflected properties.
    #[must_use]
    pub fn host_attributes(&self) -> BTreeMap<String, String> {
        let element = self.element();
        let mut attributes = self.attributes.clone();
        for decl in E::schema().reflected() {
            match element.property(decl.name).ok().and_then(|v| v.to_attribute()) {
                Some(value) => {
                    attributes.insert(decl.attribute.to_string(), value);
                }
                None => {
                    attributes.remove(decl.attribute);
                }
            }
        }
        attributes
    }

    /// Replaces the host's light children.
    pub fn set_children(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children = children.into_iter().collect();
    }

    /// The most recent render of the shadow tree.
    #[must_use]
    pub fn fragment(&self) -> Fragment {
        self.state.fragment.borrow().clone()
    }

    /// The most recent render composed with the light children.
    #[must_use]
    pub fn composed(&self) -> Fragment {
        self.state.fragment.borrow().assign_slots(&self.children)
    }

    /// Number of renders performed, including the first.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.state.renders.get()
    }

    /// Registers a listener called after every render.
    ///
    /// Listeners may read the host and commit further batches. A batch
    /// committed from a listener renders after the current render has been
    /// delivered to every listener, and that render is delivered to the
    /// listeners as well; a listener that always changes the element therefore
    /// never settles. A listener registered from inside a listener is first
    /// called on the next render.
    pub fn on_render(&self, listener: impl Fn(&Fragment) + 'static) {
        self.state.listeners.borrow_mut().push(Rc::new(listener));
    }
}

impl<E: FocusDelegating> ElementHost<E> {
    /// Focuses the host, returning the element that actually receives focus.
    ///
    /// `None` means the host keeps focus itself.
    #[must_use]
    pub fn focus(&self) -> Option<Element> {
        if !E::SHADOW_ROOT.delegates_focus {
            return None;
        }
        let fragment = self.fragment();
        E::focus_target(&fragment).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{markup::Slot, props::PropertyDecl};
    use alloc::{format, vec};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Badge {
        label: String,
        tone: Option<String>,
        highlighted: bool,
    }

    static SCHEMA: PropertySchema = PropertySchema::new(
        "badge",
        &[
            PropertyDecl::string("label", "label"),
            PropertyDecl::string("tone", "tone").reflect(),
            PropertyDecl::boolean("highlighted", "highlighted").reflect(),
        ],
    );

    impl CustomElement for Badge {
        fn schema() -> &'static PropertySchema {
            &SCHEMA
        }

        fn property(&self, name: &str) -> Result<PropValue, ElementError> {
            Ok(match SCHEMA.property(name)?.name {
                "label" => self.label.as_str().into(),
                "tone" => self.tone.clone().into(),
                _ => self.highlighted.into(),
            })
        }

        fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), ElementError> {
            let decl = SCHEMA.property(name)?;
            match decl.name {
                "label" => self.label = value.into_string(decl.name)?.unwrap_or_default(),
                "tone" => self.tone = value.into_string(decl.name)?,
                _ => self.highlighted = value.into_bool(decl.name)?,
            }
            Ok(())
        }

        fn render(&self, settings: &Settings) -> Fragment {
            Fragment::from(
                Element::new("span")
                    .attr("class", settings.class("badge"))
                    .attr_opt("data-tone", self.tone.as_deref())
                    .child(Slot::new().fallback(self.label.as_str())),
            )
        }
    }

    fn recorder(host: &ElementHost<Badge>) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        host.on_render({
            let seen = Rc::clone(&seen);
            move |fragment| seen.borrow_mut().push(fragment.to_string())
        });
        seen
    }

    #[test]
    fn renders_once_on_creation() {
        let host = ElementHost::new(Badge::default());
        assert_eq!(host.render_count(), 1);
        assert_eq!(
            host.fragment().to_string(),
            r#"<span class="cds--badge"><slot></slot></span>"#
        );
        assert_eq!(host.tag_name(), "cds-badge");
    }

    #[test]
    fn batch_renders_once() {
        let host = ElementHost::new(Badge::default());
        let seen = recorder(&host);
        assert!(host.update(|badge| {
            badge.label = "New".into();
            badge.tone = Some("green".into());
        }));
        assert_eq!(host.render_count(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![String::from(
                r#"<span class="cds--badge" data-tone="green"><slot>New</slot></span>"#
            )]
        );
    }

    #[test]
    fn unchanged_batch_does_not_render() {
        let host = ElementHost::new(Badge::default());
        assert!(!host.update(|badge| badge.label.clear()));
        assert_eq!(host.set_property("label", ""), Ok(false));
        assert_eq!(host.render_count(), 1);
    }

    #[test]
    fn failed_batch_commits_nothing() {
        let host = ElementHost::new(Badge::default());
        let result = host.try_update(|badge| {
            badge.set_property("label", "kept?".into())?;
            badge.set_property("highlighted", "yes".into())
        });
        assert!(matches!(result, Err(ElementError::TypeMismatch { .. })));
        assert_eq!(host.element(), Badge::default());
        assert_eq!(host.render_count(), 1);
    }

    #[test]
    fn unknown_property_is_an_error() {
        let host = ElementHost::new(Badge::default());
        assert_eq!(
            host.set_property("size", "lg"),
            Err(ElementError::UnknownProperty {
                element: "badge",
                name: "size".into(),
            })
        );
        assert!(host.property("size").is_err());
    }

    #[test]
    fn attributes_convert_through_the_schema() {
        let mut host = ElementHost::new(Badge::default());
        assert_eq!(host.set_attribute("HIGHLIGHTED", ""), Ok(true));
        assert_eq!(host.property("highlighted"), Ok(PropValue::Bool(true)));
        assert_eq!(host.remove_attribute("highlighted"), Ok(true));
        assert_eq!(host.property("highlighted"), Ok(PropValue::Bool(false)));
        assert_eq!(host.render_count(), 3);
    }

    #[test]
    fn unobserved_attributes_stay_on_the_host() {
        let mut host = ElementHost::new(Badge::default());
        assert_eq!(host.set_attribute("data-id", "7"), Ok(false));
        assert_eq!(host.render_count(), 1);
        assert_eq!(
            host.host_attributes().get("data-id").map(String::as_str),
            Some("7")
        );
    }

    #[test]
    fn reflected_properties_appear_on_the_host() {
        let mut host = ElementHost::new(Badge::default());
        host.update(|badge| {
            badge.tone = Some("red".into());
            badge.highlighted = true;
        });
        let attributes = host.host_attributes();
        assert_eq!(attributes.get("tone").map(String::as_str), Some("red"));
        assert_eq!(attributes.get("highlighted").map(String::as_str), Some(""));

        host.apply_attributes([("tone", None), ("highlighted", None)])
            .unwrap();
        assert!(host.host_attributes().is_empty());
    }

    #[test]
    fn composes_light_children() {
        let mut host = ElementHost::new(Badge {
            label: "fallback".into(),
            ..Badge::default()
        });
        assert_eq!(host.composed().text_content(), "fallback");
        host.set_children([Node::text("slotted")]);
        assert_eq!(host.composed().text_content(), "slotted");
        assert_eq!(host.render_count(), 1);
    }

    #[test]
    fn listeners_may_register_listeners() {
        let host = Rc::new(ElementHost::new(Badge::default()));
        let late = Rc::new(Cell::new(0));
        host.on_render({
            let host = Rc::downgrade(&host);
            let late = Rc::clone(&late);
            move |_| {
                if let Some(host) = host.upgrade() {
                    let late = Rc::clone(&late);
                    host.on_render(move |_| late.set(late.get() + 1));
                }
            }
        });
        host.update(|badge| badge.label = "one".into());
        assert_eq!(late.get(), 0);
        host.update(|badge| badge.label = "two".into());
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn debug_names_the_tag() {
        let host = ElementHost::new(Badge::default());
        assert!(format!("{host:?}").contains("cds-badge"));
    }
}
