//! Sync status toast.
//!
//! One element per page, created on first use. Each message is shown for a
//! fixed window; a newer message replaces the text and restarts the window.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::host::{style, ElementHandle, ElementSpec, UiHost};

pub const STATUS_ELEMENT_ID: &str = "github-sync-status";
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

const SUCCESS_BACKGROUND: &str = "rgba(76, 175, 80, 0.9)";
const ERROR_BACKGROUND: &str = "rgba(244, 67, 54, 0.9)";

fn status_element_spec() -> ElementSpec {
    ElementSpec::new("div").id(STATUS_ELEMENT_ID).style(style(&[
        ("position", "fixed"),
        ("bottom", "20px"),
        ("right", "20px"),
        ("padding", "10px 15px"),
        ("background", "rgba(0,0,0,0.8)"),
        ("color", "#fff"),
        ("border-radius", "8px"),
        ("font-size", "12px"),
        ("z-index", "9999"),
        ("display", "none"),
    ]))
}

#[derive(Default)]
struct ToastState {
    element: Option<ElementHandle>,
    /// Bumped by every `show`; a hide timer only acts on its own generation.
    generation: u64,
    hide_task: Option<JoinHandle<()>>,
}

impl ToastState {
    /// Hide the toast unless a newer message has been shown since `generation`.
    fn hide_if_current(&self, host: &dyn UiHost, generation: u64) -> bool {
        match self.element {
            Some(element) if self.generation == generation => {
                host.set_style(element, "display", "none");
                true
            }
            _ => false,
        }
    }
}

pub struct StatusToast {
    host: Arc<dyn UiHost>,
    display_window: Duration,
    state: Arc<Mutex<ToastState>>,
}

fn lock_state(state: &Mutex<ToastState>) -> MutexGuard<'_, ToastState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StatusToast {
    pub fn new(host: Arc<dyn UiHost>) -> Self {
        Self::with_display_window(host, DEFAULT_DISPLAY_WINDOW)
    }

    pub fn with_display_window(host: Arc<dyn UiHost>, display_window: Duration) -> Self {
        Self {
            host,
            display_window,
            state: Arc::new(Mutex::new(ToastState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        lock_state(&self.state)
    }

    fn element(&self, state: &mut ToastState) -> ElementHandle {
        if let Some(element) = state.element {
            return element;
        }
        let element = self
            .host
            .element_by_id(STATUS_ELEMENT_ID)
            .unwrap_or_else(|| self.host.append(status_element_spec()));
        state.element = Some(element);
        element
    }

    /// Show `message`, green for success or red for errors.
    ///
    /// The hide timer runs on the current tokio runtime. Without one the
    /// message stays up until the next call.
    pub fn show(&self, message: &str, is_error: bool) {
        let mut state = self.lock();
        let element = self.element(&mut state);

        state.generation += 1;
        let generation = state.generation;
        if let Some(previous) = state.hide_task.take() {
            previous.abort();
        }

        let background = if is_error {
            ERROR_BACKGROUND
        } else {
            SUCCESS_BACKGROUND
        };
        self.host.set_style(element, "display", "block");
        self.host.set_style(element, "background", background);
        self.host.set_text(element, message);
        debug!("Sync status shown (error={}): {}", is_error, message);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, sync status will not auto-hide");
            return;
        };
        let host = Arc::clone(&self.host);
        let shared = Arc::clone(&self.state);
        let window = self.display_window;
        state.hide_task = Some(runtime.spawn(async move {
            tokio::time::sleep(window).await;
            // abort() cannot stop a timer that already woke, so re-check under the lock.
            lock_state(&shared).hide_if_current(&*host, generation);
        }));
    }

    pub fn success(&self, message: &str) {
        self.show(message, false);
    }

    pub fn error(&self, message: &str) {
        self.show(message, true);
    }
}

impl Drop for StatusToast {
    fn drop(&mut self) {
        if let Some(task) = self.lock().hide_task.take() {
            task.abort();
        }
    }
}
