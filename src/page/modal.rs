use crate::page::element::ElementHandle;

/// The subscribe modal container. Open and close are plain visibility
/// writes, so repeated clicks are harmless.
pub struct Modal {
    container: ElementHandle,
}

impl Modal {
    pub fn new(container: ElementHandle) -> Self {
        Self { container }
    }

    pub fn open(&self) {
        self.container.show();
    }

    pub fn close(&self) {
        self.container.hide();
    }

    pub fn is_open(&self) -> bool {
        self.container.is_visible()
    }

    pub fn container(&self) -> &ElementHandle {
        &self.container
    }
}
