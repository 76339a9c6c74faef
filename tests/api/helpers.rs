use newsletter_signup::get_configuration;
use newsletter_signup::startup::{Application, get_connection_pool};
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub email_server: MockServer,
}

pub struct WelcomeLinks {
    pub html: reqwest::Url,
    pub plain_text: reqwest::Url,
}

impl TestApp {
    pub async fn post_subscriptions(
        &self,
        first: &'static str,
        last: &'static str,
        email: &'static str,
    ) -> reqwest::Response {
        let form = reqwest::multipart::Form::new()
            .text("first", first)
            .text("last", last)
            .text("email", email);
        self.post_subscriptions_form(form).await
    }

    pub async fn post_subscriptions_form(
        &self,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/subscriptions", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn get_welcome_links(&self, request: &wiremock::Request) -> WelcomeLinks {
        let body: serde_json::Value =
            serde_json::from_slice(&request.body).expect("Invalid email request body");
        let html = self.get_url_link(body["html"].as_str().unwrap());
        let plain_text = self.get_url_link(body["text"].as_str().unwrap());
        WelcomeLinks { html, plain_text }
    }

    fn get_url_link(&self, s: &str) -> reqwest::Url {
        let links: Vec<_> = linkify::LinkFinder::new()
            .links(s)
            .filter(|l| *l.kind() == linkify::LinkKind::Url)
            .collect();
        let raw_link = links.first().expect("Failed to find raw url").as_str();
        let link = reqwest::Url::parse(raw_link).expect("Invalid raw url");
        // Let's make sure we don't call random APIs on the web
        assert_eq!(link.host_str().unwrap(), "127.0.0.1");
        link
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // One throwaway database file per test run.
        c.database.database_path = temp_database_path();
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c
    };

    let db_pool = get_connection_pool(&configuration.database);

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        db_pool,
        email_server,
    }
}

fn temp_database_path() -> String {
    let filename = format!("newsletter-test-{}.db", uuid::Uuid::new_v4());
    std::env::temp_dir().join(filename).display().to_string()
}
