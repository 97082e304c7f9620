//! The page abstraction the widgets are built against.

use std::collections::BTreeMap;

/// Document loading state, as in `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Opaque reference to an element owned by a [`UiHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

pub type Style = BTreeMap<String, String>;

/// Build a [`Style`] from `(property, value)` pairs.
pub fn style(pairs: &[(&str, &str)]) -> Style {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Description of an element to append to the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub href: Option<String>,
    pub text: String,
    pub style: Style,
    /// Properties applied while the pointer is over the element and
    /// restored from `style` when it leaves.
    pub hover_style: Style,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            href: None,
            text: String::new(),
            style: Style::new(),
            hover_style: Style::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn hover_style(mut self, style: Style) -> Self {
        self.hover_style = style;
        self
    }
}

/// A page the widgets can attach to.
///
/// Implementations must be callable from any thread; the widgets only ever
/// touch elements they appended themselves.
pub trait UiHost: Send + Sync {
    fn ready_state(&self) -> ReadyState;

    /// Run `callback` once the page leaves [`ReadyState::Loading`].
    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>);

    fn element_by_id(&self, id: &str) -> Option<ElementHandle>;

    /// Append an element to the page body.
    fn append(&self, spec: ElementSpec) -> ElementHandle;

    fn set_style(&self, element: ElementHandle, property: &str, value: &str);

    fn set_text(&self, element: ElementHandle, text: &str);
}
