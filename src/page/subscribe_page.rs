use crate::page::element::ElementHandle;
use crate::page::events::{Action, Binding, EventKind, PageEvent, SubmissionEvent};
use crate::page::form::SubscribeForm;
use crate::page::ids;
use crate::page::menu::MenuToggle;
use crate::page::modal::Modal;
use crate::page::submitter::{SubmissionPanels, SubmitOutcome, SubscriptionSubmitter};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Named inputs of the subscribe form, in markup order.
const FORM_FIELDS: [&str; 3] = ["first", "last", "email"];

/// Everything needed to stand up the page model.
pub struct PageConfig {
    /// Destination of the subscribe form, i.e. its action attribute.
    pub form_action: Url,
    /// Upper bound on how long a submission may stay in flight.
    pub request_timeout: Duration,
    /// Number of dropdown sections in the phone menu.
    pub menu_sections: usize,
}

/// The subscribe page's interactive surface: phone menu, subscribe modal,
/// the form, and the submitter that completes it.
///
/// Event wiring goes through an explicit binding table instead of ad-hoc
/// callbacks, so [`bindings`] shows exactly which element triggers which
/// action, and [`detach`] reliably unhooks everything.
///
/// [`bindings`]: SubscribePage::bindings
/// [`detach`]: SubscribePage::detach
pub struct SubscribePage {
    menu: MenuToggle,
    modal: Modal,
    form: Arc<SubscribeForm>,
    submitter: SubscriptionSubmitter,
    panels: SubmissionPanels,
    bindings: Vec<Binding>,
    attached: bool,
}

impl SubscribePage {
    pub fn new(config: PageConfig) -> Self {
        let button = ElementHandle::with_label(ids::PHONE_MENU_BUTTON, true, "Menu");
        let sections = (0..config.menu_sections)
            .map(|_| ElementHandle::new(ids::PHONE_MENU_DROPDOWN, false))
            .collect();
        let menu = MenuToggle::new(button, sections);

        let modal = Modal::new(ElementHandle::new(ids::SUBSCRIBE_MODAL, false));

        let form = Arc::new(SubscribeForm::new(config.form_action, &FORM_FIELDS));
        let panels = SubmissionPanels {
            form: ElementHandle::new(ids::SUBSCRIBE_FORM, true),
            initial_message: ElementHandle::new(ids::INITIAL_MESSAGE, true),
            duplicate_message: ElementHandle::new(ids::DUPLICATE_EMAIL_MESSAGE, false),
            success_message: ElementHandle::new(ids::SUCCESS_MESSAGE, false),
            error_message: ElementHandle::new(ids::ERROR_MESSAGE, false),
        };
        let submitter = SubscriptionSubmitter::new(config.request_timeout, panels.clone());

        Self {
            menu,
            modal,
            form,
            submitter,
            panels,
            bindings: Vec::new(),
            attached: false,
        }
    }

    /// Register the page's event wiring. Idempotent: the binding table is
    /// rebuilt, not appended to.
    pub fn attach(&mut self) {
        self.bindings = vec![
            Binding {
                target: ids::PHONE_MENU_BUTTON,
                kind: EventKind::Click,
                action: Action::ToggleMenu,
            },
            Binding {
                target: ids::SUBSCRIBE_LINK,
                kind: EventKind::Click,
                action: Action::OpenModal,
            },
            Binding {
                target: ids::MODAL_CLOSE,
                kind: EventKind::Click,
                action: Action::CloseModal,
            },
            // A click on the modal container itself is the backdrop click.
            Binding {
                target: ids::SUBSCRIBE_MODAL,
                kind: EventKind::Click,
                action: Action::CloseModal,
            },
            Binding {
                target: ids::SUBSCRIBE_FORM,
                kind: EventKind::Submit,
                action: Action::SubmitForm,
            },
        ];
        self.attached = true;
    }

    /// Drop every registration. Events dispatched afterwards fall through
    /// untouched, as if the script never loaded.
    pub fn detach(&mut self) {
        self.bindings.clear();
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Route one event through the binding table. Returns the outcome when
    /// the event completed a form submission, `None` otherwise.
    pub async fn dispatch(&self, event: PageEvent) -> Option<SubmitOutcome> {
        match event {
            PageEvent::Click { target } => {
                let binding = self
                    .bindings
                    .iter()
                    .find(|binding| binding.kind == EventKind::Click && binding.target == target)?;
                match binding.action {
                    Action::ToggleMenu => self.menu.toggle(),
                    Action::OpenModal => self.modal.open(),
                    Action::CloseModal => self.modal.close(),
                    Action::SubmitForm => {}
                }
                None
            }
            PageEvent::Submit(submission) => {
                let registered = self.bindings.iter().any(|binding| {
                    binding.kind == EventKind::Submit && binding.target == ids::SUBSCRIBE_FORM
                });
                if !registered {
                    return None;
                }
                Some(self.submitter.handle_submission(submission).await)
            }
        }
    }

    pub fn menu(&self) -> &MenuToggle {
        &self.menu
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn form(&self) -> &Arc<SubscribeForm> {
        &self.form
    }

    pub fn panels(&self) -> &SubmissionPanels {
        &self.panels
    }

    /// Build the submission the host would raise for the subscribe form.
    pub fn submission(&self) -> SubmissionEvent {
        SubmissionEvent::new(Arc::clone(&self.form))
    }
}
