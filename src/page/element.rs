use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Handle to one element whose visibility (and, for the menu button, text
/// content) the page mutates.
///
/// Clones share state, so a handle wired into an event binding and a handle
/// held for assertions observe the same element.
#[derive(Clone, Debug)]
pub struct ElementHandle {
    id: &'static str,
    visible: Arc<AtomicBool>,
    label: Arc<Mutex<String>>,
}

impl ElementHandle {
    pub fn new(id: &'static str, visible: bool) -> Self {
        Self {
            id,
            visible: Arc::new(AtomicBool::new(visible)),
            label: Arc::new(Mutex::new(String::new())),
        }
    }

    pub fn with_label(id: &'static str, visible: bool, label: &str) -> Self {
        let handle = Self::new(id, visible);
        handle.set_label(label);
        handle
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    pub fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    pub fn set_label(&self, label: &str) {
        *self.label.lock().unwrap() = label.to_owned();
    }

    pub fn label(&self) -> String {
        self.label.lock().unwrap().clone()
    }
}
