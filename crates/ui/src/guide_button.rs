//! Fixed "back to guide" link shown on every tool page.

use std::sync::Arc;

use log::debug;

use crate::host::{style, ElementSpec, UiHost};

pub const GUIDE_BUTTON_ID: &str = "guide-back-button";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideButton {
    pub href: String,
    pub label: String,
}

impl Default for GuideButton {
    fn default() -> Self {
        Self {
            href: "guide.html".to_string(),
            label: "← 返回指南".to_string(),
        }
    }
}

impl GuideButton {
    pub fn element_spec(&self) -> ElementSpec {
        ElementSpec::new("a")
            .id(GUIDE_BUTTON_ID)
            .href(&self.href)
            .text(&self.label)
            .style(style(&[
                ("position", "fixed"),
                ("top", "10px"),
                ("left", "10px"),
                ("padding", "8px 16px"),
                ("background", "rgba(0, 0, 0, 0.7)"),
                ("color", "#fff"),
                ("text-decoration", "none"),
                ("border-radius", "6px"),
                ("font-size", "14px"),
                ("z-index", "9999"),
                ("transition", "background 0.3s"),
            ]))
            .hover_style(style(&[("background", "rgba(0, 0, 0, 0.9)")]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    Installed,
    /// Page still loading; the button is appended once it is ready.
    Deferred,
    AlreadyPresent,
}

fn append_once(host: &dyn UiHost, button: &GuideButton) -> Installation {
    if host.element_by_id(GUIDE_BUTTON_ID).is_some() {
        return Installation::AlreadyPresent;
    }
    host.append(button.element_spec());
    debug!("Guide button installed -> {}", button.href);
    Installation::Installed
}

/// Add the guide button to the page, now or when the page becomes ready.
pub fn install_guide_button(host: &Arc<dyn UiHost>, button: GuideButton) -> Installation {
    if host.ready_state().is_ready() {
        return append_once(&**host, &button);
    }

    let deferred_host = Arc::clone(host);
    host.on_ready(Box::new(move || {
        append_once(&*deferred_host, &button);
    }));
    Installation::Deferred
}
