//! In-memory model of the site's client-side page behavior: the phone menu
//! toggle, the subscribe modal, and the asynchronous subscribe-form
//! submission.
//!
//! Element visibility lives behind shared [`ElementHandle`]s and event
//! wiring goes through the explicit binding table on [`SubscribePage`], so
//! the whole surface can be driven and asserted on without a browser. The
//! one piece with real behavior is the [`SubscriptionSubmitter`], which
//! posts the form and resolves the message panels from the response.

mod element;
mod events;
mod form;
mod menu;
mod modal;
mod submitter;
mod subscribe_page;

pub use element::ElementHandle;
pub use events::{Action, Binding, EventKind, NavigationProbe, PageEvent, SubmissionEvent};
pub use form::{FormPayload, SubscribeForm};
pub use menu::MenuToggle;
pub use modal::Modal;
pub use submitter::{
    DUPLICATE_EMAIL, SubmissionPanels, SubmissionResult, SubmitOutcome, SubscriptionSubmitter,
};
pub use subscribe_page::{PageConfig, SubscribePage};

/// Identifiers of the page elements the script drives, as they appear in
/// the markup.
pub mod ids {
    pub const PHONE_MENU_BUTTON: &str = "phone-menu-btn";
    pub const PHONE_MENU_DROPDOWN: &str = "phone-menu-dropdown";
    pub const SUBSCRIBE_MODAL: &str = "subscribe_modal";
    pub const SUBSCRIBE_LINK: &str = "subscribe-link";
    pub const MODAL_CLOSE: &str = "modal_close";
    pub const SUBSCRIBE_FORM: &str = "subscribe-form";
    pub const INITIAL_MESSAGE: &str = "initial-subscribe-message";
    pub const DUPLICATE_EMAIL_MESSAGE: &str = "subscribe-dup-email-message";
    pub const SUCCESS_MESSAGE: &str = "subscribe-success-message";
    pub const ERROR_MESSAGE: &str = "subscribe-error-message";
}
