use crate::page::element::ElementHandle;

const COLLAPSED_LABEL: &str = "Menu";
const EXPANDED_LABEL: &str = "Hide";

/// The phone-header menu: one button driving a collection of dropdown
/// sections in lockstep, keyed off the first section's visibility.
pub struct MenuToggle {
    button: ElementHandle,
    sections: Vec<ElementHandle>,
}

impl MenuToggle {
    pub fn new(button: ElementHandle, sections: Vec<ElementHandle>) -> Self {
        Self { button, sections }
    }

    /// Flip every section. With no sections this is a no-op and the button
    /// label is left alone.
    pub fn toggle(&self) {
        let Some(first) = self.sections.first() else {
            return;
        };
        if first.is_visible() {
            for section in &self.sections {
                section.hide();
            }
            self.button.set_label(COLLAPSED_LABEL);
        } else {
            for section in &self.sections {
                section.show();
            }
            self.button.set_label(EXPANDED_LABEL);
        }
    }

    pub fn is_open(&self) -> bool {
        self.sections.first().is_some_and(ElementHandle::is_visible)
    }

    pub fn button(&self) -> &ElementHandle {
        &self.button
    }

    pub fn sections(&self) -> &[ElementHandle] {
        &self.sections
    }
}
