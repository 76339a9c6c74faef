use crate::page::element::ElementHandle;
use crate::page::events::SubmissionEvent;
use crate::page::form::FormPayload;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

/// Status-text sentinel the subscription endpoint sends to signal a
/// business-rule conflict rather than a protocol error.
pub const DUPLICATE_EMAIL: &str = "Duplicate Email";

/// Longest status text retained from a response.
const STATUS_TEXT_MAX_CHARS: usize = 120;

/// What came back from the subscription endpoint, reduced to the parts the
/// page branches on.
#[derive(Clone, Debug)]
pub struct SubmissionResult {
    pub status: StatusCode,
    pub status_text: Option<String>,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Reason phrases do not survive HTTP/2, so the endpoint echoes its
    /// status text as the leading line of the body. An empty or unreadable
    /// body yields no status text.
    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_text = response
            .text()
            .await
            .ok()
            .and_then(|body| extract_status_text(&body));
        Self {
            status,
            status_text,
        }
    }
}

fn extract_status_text(body: &str) -> Option<String> {
    let line = body.lines().map(str::trim).find(|line| !line.is_empty())?;
    Some(line.chars().take(STATUS_TEXT_MAX_CHARS).collect())
}

/// How a submission attempt resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the sign-up.
    Subscribed,
    /// The endpoint answered with the [`DUPLICATE_EMAIL`] sentinel.
    DuplicateEmail,
    /// Any other response status.
    Rejected(StatusCode),
    /// The request settled without producing a response, e.g. the endpoint
    /// was unreachable or the configured timeout elapsed.
    TransportFailed,
}

impl SubmitOutcome {
    /// The sentinel is checked before the status code, so a conflict is
    /// reported as a duplicate no matter which status carries it.
    fn classify(result: &SubmissionResult) -> Self {
        match result.status_text.as_deref() {
            Some(DUPLICATE_EMAIL) => SubmitOutcome::DuplicateEmail,
            _ if result.is_success() => SubmitOutcome::Subscribed,
            _ => SubmitOutcome::Rejected(result.status),
        }
    }
}

/// The message surfaces a submission resolves between, plus the form itself.
#[derive(Clone)]
pub struct SubmissionPanels {
    pub form: ElementHandle,
    pub initial_message: ElementHandle,
    pub duplicate_message: ElementHandle,
    pub success_message: ElementHandle,
    pub error_message: ElementHandle,
}

impl SubmissionPanels {
    /// Ids of the currently visible surfaces, in markup order.
    pub fn visible_ids(&self) -> Vec<&'static str> {
        [
            &self.initial_message,
            &self.form,
            &self.duplicate_message,
            &self.success_message,
            &self.error_message,
        ]
        .into_iter()
        .filter(|element| element.is_visible())
        .map(|element| element.id())
        .collect()
    }

    fn resolve(&self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Subscribed => {
                self.form.hide();
                self.initial_message.hide();
                self.duplicate_message.hide();
                self.error_message.hide();
                self.success_message.show();
            }
            SubmitOutcome::DuplicateEmail => {
                self.error_message.hide();
                self.duplicate_message.show();
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::TransportFailed => {
                self.duplicate_message.hide();
                self.error_message.show();
            }
        }
    }
}

/// Intercepts subscribe-form submissions and completes them against the
/// form's action URL, then resolves the message panels from the response.
pub struct SubscriptionSubmitter {
    http_client: reqwest::Client,
    panels: SubmissionPanels,
}

impl SubscriptionSubmitter {
    /// The client mirrors the page's fetch policy: no caching, no referrer,
    /// redirects followed. `timeout` bounds how long an unresponsive
    /// endpoint can keep a submission pending.
    pub fn new(timeout: Duration, panels: SubmissionPanels) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .referer(false)
            .build()
            .unwrap();
        Self {
            http_client,
            panels,
        }
    }

    /// Consume one submission end to end.
    ///
    /// The default navigation is suppressed before the first await, so the
    /// host never starts a reload while the request is in flight. Each
    /// outcome maps to exactly one panel resolution; a duplicate leaves the
    /// form on screen, success replaces it with the success message, and
    /// everything else reveals the generic error notice.
    #[tracing::instrument(
        name = "Submitting the subscribe form",
        skip(self, event),
        fields(form_action = %event.form().action())
    )]
    pub async fn handle_submission(&self, event: SubmissionEvent) -> SubmitOutcome {
        event.prevent_default();

        let payload = event.form().payload();
        let action = event.form().action().clone();

        let outcome = match self.post_payload(action, payload).await {
            Ok(result) => SubmitOutcome::classify(&result),
            Err(error) => {
                tracing::warn!(error = %error, "Subscription request failed in transit");
                SubmitOutcome::TransportFailed
            }
        };

        self.panels.resolve(outcome);
        tracing::info!(outcome = ?outcome, "Subscription attempt resolved");
        outcome
    }

    async fn post_payload(
        &self,
        action: Url,
        payload: FormPayload,
    ) -> Result<SubmissionResult, reqwest::Error> {
        let response = self
            .http_client
            .post(action)
            .header("Cache-Control", "no-cache")
            .multipart(payload.into_multipart())
            .send()
            .await?;
        Ok(SubmissionResult::from_response(response).await)
    }
}
