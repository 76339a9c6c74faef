use std::fmt;
use validator::Validate;

/// The validated email address of a subscriber.
#[derive(Debug, Clone, Validate)]
pub struct SubscriberEmail {
    #[validate(email)]
    email: String,
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let subscriber_email = Self { email: value };
        match subscriber_email.validate() {
            Ok(_) => Ok(subscriber_email),
            Err(_) => Err(format!(
                "'{}' is not a valid subscriber email",
                subscriber_email.email
            )),
        }
    }
}
