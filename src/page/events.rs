use crate::page::form::SubscribeForm;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What a binding listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
}

/// What a binding does when its event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    OpenModal,
    CloseModal,
    SubmitForm,
}

/// One element-to-action registration. The page exposes its whole binding
/// table so the wiring can be inspected without a live host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub target: &'static str,
    pub kind: EventKind,
    pub action: Action,
}

/// An event raised against the page: a click on a named element, or the
/// subscribe form being submitted.
#[derive(Debug)]
pub enum PageEvent {
    Click { target: &'static str },
    Submit(SubmissionEvent),
}

/// A submission raised by the host for the subscribe form.
///
/// Consumed exactly once; whoever handles it must call [`prevent_default`]
/// before yielding, otherwise the host is free to navigate away.
///
/// [`prevent_default`]: SubmissionEvent::prevent_default
#[derive(Debug)]
pub struct SubmissionEvent {
    form: Arc<SubscribeForm>,
    default_suppressed: Arc<AtomicBool>,
}

impl SubmissionEvent {
    pub fn new(form: Arc<SubscribeForm>) -> Self {
        Self {
            form,
            default_suppressed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Suppress the navigation the host would otherwise perform.
    pub fn prevent_default(&self) {
        self.default_suppressed.store(true, Ordering::SeqCst);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_suppressed.load(Ordering::SeqCst)
    }

    pub fn form(&self) -> &Arc<SubscribeForm> {
        &self.form
    }

    /// A probe that outlives the event, for checking the navigation flag
    /// after the event has been consumed.
    pub fn navigation_probe(&self) -> NavigationProbe {
        NavigationProbe {
            default_suppressed: Arc::clone(&self.default_suppressed),
        }
    }
}

/// Observer for a consumed [`SubmissionEvent`]'s navigation flag.
#[derive(Clone, Debug)]
pub struct NavigationProbe {
    default_suppressed: Arc<AtomicBool>,
}

impl NavigationProbe {
    /// True when nothing suppressed the default behavior, i.e. the host
    /// would have reloaded the page.
    pub fn would_navigate(&self) -> bool {
        !self.default_suppressed.load(Ordering::SeqCst)
    }
}
