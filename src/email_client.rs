use crate::domain::SubscriberEmail;
use secrecy::{ExposeSecret, SecretBox};

/// Client for the transactional-email HTTP API used to deliver welcome
/// emails to new subscribers.
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: SubscriberEmail,
    sender_name: String,
    api_key: SecretBox<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmail,
        sender_name: String,
        api_key: SecretBox<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();

        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
        }
    }

    pub async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/v1/send", self.base_url);
        let request_body = SendEmailRequest {
            sender: Address {
                name: &self.sender_name,
                email: self.sender.as_ref(),
            },
            to: vec![Address {
                name: "",
                email: recipient.as_ref(),
            }],
            subject,
            html: html_body,
            text: text_body,
        };
        self.http_client
            .post(&url)
            .header("api-key", self.api_key.expose_secret().as_str())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(serde::Serialize)]
struct Address<'a> {
    name: &'a str,
    email: &'a str,
}
