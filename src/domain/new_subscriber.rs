use crate::domain::{SubscriberEmail, SubscriberName};
use crate::routes::subscriptions::FormData;

#[derive(Debug)]
pub struct NewSubscriber {
    pub first: SubscriberName,
    pub last: SubscriberName,
    pub email: SubscriberEmail,
}

impl TryFrom<FormData> for NewSubscriber {
    type Error = String;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        let first = SubscriberName::try_from(form.first.0)?;
        let last = SubscriberName::try_from(form.last.0)?;
        let email = SubscriberEmail::try_from(form.email.0)?;
        Ok(Self { first, last, email })
    }
}
