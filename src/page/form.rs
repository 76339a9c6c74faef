use std::sync::Mutex;
use url::Url;

/// The subscribe form: its destination address and the current value of
/// every named input.
#[derive(Debug)]
pub struct SubscribeForm {
    action: Url,
    fields: Mutex<Vec<(String, String)>>,
}

impl SubscribeForm {
    /// A form with the given action and named fields, all initially empty.
    /// Field order is preserved through to the outgoing request body.
    pub fn new(action: Url, field_names: &[&str]) -> Self {
        let fields = field_names
            .iter()
            .map(|name| ((*name).to_owned(), String::new()))
            .collect();
        Self {
            action,
            fields: Mutex::new(fields),
        }
    }

    pub fn action(&self) -> &Url {
        &self.action
    }

    /// Update one input. Returns `false` when the form has no field with
    /// that name, leaving the form untouched.
    pub fn set_input(&self, name: &str, value: &str) -> bool {
        let mut fields = self.fields.lock().unwrap();
        match fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => {
                *slot = value.to_owned();
                true
            }
            None => false,
        }
    }

    /// Snapshot the current field values. The payload is decoupled from the
    /// form: edits made while a request is in flight do not alter it.
    pub fn payload(&self) -> FormPayload {
        FormPayload(self.fields.lock().unwrap().clone())
    }
}

/// Ordered field name/value pairs captured from the form at submission time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPayload(Vec<(String, String)>);

impl FormPayload {
    pub fn fields(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn into_multipart(self) -> reqwest::multipart::Form {
        self.0
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            })
    }
}
