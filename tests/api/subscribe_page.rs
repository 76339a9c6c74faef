use crate::helpers::spawn_app;
use newsletter_signup::page::{PageConfig, PageEvent, SubmitOutcome, SubscribePage, ids};
use reqwest::StatusCode;
use sqlx::Row;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn page_for(address: &str) -> SubscribePage {
    let form_action = reqwest::Url::parse(&format!("{}/subscriptions", address)).unwrap();
    let mut page = SubscribePage::new(PageConfig {
        form_action,
        request_timeout: Duration::from_secs(2),
        menu_sections: 2,
    });
    page.attach();
    page
}

fn fill(page: &SubscribePage, first: &str, last: &str, email: &str) {
    page.form().set_input("first", first);
    page.form().set_input("last", last);
    page.form().set_input("email", email);
}

#[tokio::test]
async fn a_submission_through_the_page_signs_the_reader_up() {
    let app = spawn_app().await;

    Mock::given(path("/v1/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let page = page_for(&app.address);
    fill(&page, "Jane", "Doe", "jane.doe@example.com");

    let submission = page.submission();
    let probe = submission.navigation_probe();
    let outcome = page.dispatch(PageEvent::Submit(submission)).await;

    assert_eq!(outcome, Some(SubmitOutcome::Subscribed));
    assert!(!probe.would_navigate());
    assert_eq!(page.panels().visible_ids(), vec![ids::SUCCESS_MESSAGE]);

    let saved = sqlx::query("SELECT email FROM subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch saved subscriber.");
    assert_eq!(saved.get::<String, _>("email"), "jane.doe@example.com");
}

#[tokio::test]
async fn an_already_subscribed_email_shows_the_duplicate_notice_and_keeps_the_form() {
    let app = spawn_app().await;

    // Only the original sign-up gets a welcome email.
    Mock::given(path("/v1/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_subscriptions("Jane", "Doe", "jane.doe@example.com")
        .await;

    let page = page_for(&app.address);
    fill(&page, "Janet", "Doe", "jane.doe@example.com");

    let outcome = page.dispatch(PageEvent::Submit(page.submission())).await;

    assert_eq!(outcome, Some(SubmitOutcome::DuplicateEmail));
    assert_eq!(
        page.panels().visible_ids(),
        vec![
            ids::INITIAL_MESSAGE,
            ids::SUBSCRIBE_FORM,
            ids::DUPLICATE_EMAIL_MESSAGE
        ]
    );
}

#[tokio::test]
async fn invalid_form_data_surfaces_the_generic_error_notice() {
    let app = spawn_app().await;

    let page = page_for(&app.address);
    fill(&page, "Jane", "Doe", "not-an-email");

    let outcome = page.dispatch(PageEvent::Submit(page.submission())).await;

    assert_eq!(
        outcome,
        Some(SubmitOutcome::Rejected(StatusCode::BAD_REQUEST))
    );
    assert!(page.panels().form.is_visible());
    assert!(page.panels().error_message.is_visible());
}

#[tokio::test]
async fn an_unreachable_site_surfaces_the_generic_error_notice() {
    // Grab a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let page = page_for(&format!("http://127.0.0.1:{}", port));
    fill(&page, "Jane", "Doe", "jane.doe@example.com");

    let submission = page.submission();
    let probe = submission.navigation_probe();
    let outcome = page.dispatch(PageEvent::Submit(submission)).await;

    assert_eq!(outcome, Some(SubmitOutcome::TransportFailed));
    assert!(!probe.would_navigate());
    assert_eq!(
        page.panels().visible_ids(),
        vec![ids::INITIAL_MESSAGE, ids::SUBSCRIBE_FORM, ids::ERROR_MESSAGE]
    );
}

#[tokio::test]
async fn a_failed_attempt_can_be_retried_from_the_same_form() {
    let app = spawn_app().await;

    Mock::given(path("/v1/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let page = page_for(&app.address);
    fill(&page, "Jane", "Doe", "not-an-email");

    let outcome = page.dispatch(PageEvent::Submit(page.submission())).await;
    assert_eq!(
        outcome,
        Some(SubmitOutcome::Rejected(StatusCode::BAD_REQUEST))
    );
    assert!(page.panels().error_message.is_visible());

    page.form().set_input("email", "jane.doe@example.com");
    let outcome = page.dispatch(PageEvent::Submit(page.submission())).await;

    assert_eq!(outcome, Some(SubmitOutcome::Subscribed));
    assert_eq!(page.panels().visible_ids(), vec![ids::SUCCESS_MESSAGE]);
}
