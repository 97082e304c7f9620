//! Page widgets shown alongside sync: the status toast and the guide button.

pub mod guide_button;
pub mod headless;
pub mod host;
pub mod toast;

pub use guide_button::{install_guide_button, GuideButton, Installation, GUIDE_BUTTON_ID};
pub use headless::{ElementState, HeadlessHost};
pub use host::{style, ElementHandle, ElementSpec, ReadyState, Style, UiHost};
pub use toast::{StatusToast, DEFAULT_DISPLAY_WINDOW, STATUS_ELEMENT_ID};
