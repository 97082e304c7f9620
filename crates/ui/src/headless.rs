//! In-memory [`UiHost`] for tests and non-browser embedding.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::host::{ElementHandle, ElementSpec, ReadyState, Style, UiHost};

/// Snapshot of an element held by a [`HeadlessHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub handle: ElementHandle,
    pub tag: String,
    pub id: Option<String>,
    pub href: Option<String>,
    pub text: String,
    pub style: Style,
    hover_style: Style,
    rest_style: Style,
}

impl ElementState {
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn is_displayed(&self) -> bool {
        self.style_value("display") != Some("none")
    }
}

type ReadyCallback = Box<dyn FnOnce() + Send>;

struct HostState {
    ready: ReadyState,
    elements: Vec<ElementState>,
    pending: Vec<ReadyCallback>,
    next_handle: u64,
}

pub struct HeadlessHost {
    state: Mutex<HostState>,
}

impl HeadlessHost {
    pub fn new(ready: ReadyState) -> Self {
        Self {
            state: Mutex::new(HostState {
                ready,
                elements: Vec::new(),
                pending: Vec::new(),
                next_handle: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `ready`, running deferred callbacks when the page becomes ready.
    pub fn set_ready_state(&self, ready: ReadyState) {
        let callbacks = {
            let mut state = self.lock();
            state.ready = ready;
            if ready.is_ready() {
                std::mem::take(&mut state.pending)
            } else {
                Vec::new()
            }
        };
        for callback in callbacks {
            callback();
        }
    }

    pub fn elements(&self) -> Vec<ElementState> {
        self.lock().elements.clone()
    }

    pub fn element(&self, handle: ElementHandle) -> Option<ElementState> {
        self.lock()
            .elements
            .iter()
            .find(|el| el.handle == handle)
            .cloned()
    }

    pub fn find(&self, id: &str) -> Option<ElementState> {
        self.lock()
            .elements
            .iter()
            .find(|el| el.id.as_deref() == Some(id))
            .cloned()
    }

    /// Simulate the pointer entering or leaving an element.
    pub fn hover(&self, handle: ElementHandle, over: bool) {
        let mut state = self.lock();
        if let Some(el) = state.elements.iter_mut().find(|el| el.handle == handle) {
            let source = if over { &el.hover_style } else { &el.rest_style };
            let updates = source.clone();
            el.style.extend(updates);
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(ReadyState::Complete)
    }
}

impl UiHost for HeadlessHost {
    fn ready_state(&self) -> ReadyState {
        self.lock().ready
    }

    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>) {
        let mut state = self.lock();
        if state.ready.is_ready() {
            drop(state);
            callback();
            return;
        }
        state.pending.push(callback);
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.lock()
            .elements
            .iter()
            .find(|el| el.id.as_deref() == Some(id))
            .map(|el| el.handle)
    }

    fn append(&self, spec: ElementSpec) -> ElementHandle {
        let mut state = self.lock();
        let handle = ElementHandle(state.next_handle);
        state.next_handle += 1;

        let rest_style = spec
            .hover_style
            .keys()
            .filter_map(|k| spec.style.get(k).map(|v| (k.clone(), v.clone())))
            .collect();
        state.elements.push(ElementState {
            handle,
            tag: spec.tag,
            id: spec.id,
            href: spec.href,
            text: spec.text,
            style: spec.style,
            hover_style: spec.hover_style,
            rest_style,
        });
        handle
    }

    fn set_style(&self, element: ElementHandle, property: &str, value: &str) {
        let mut state = self.lock();
        if let Some(el) = state.elements.iter_mut().find(|el| el.handle == element) {
            el.style.insert(property.to_string(), value.to_string());
        }
    }

    fn set_text(&self, element: ElementHandle, text: &str) {
        let mut state = self.lock();
        if let Some(el) = state.elements.iter_mut().find(|el| el.handle == element) {
            el.text = text.to_string();
        }
    }
}
