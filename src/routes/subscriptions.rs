use crate::domain::{NewSubscriber, SubscriberEmail};
use crate::email_client::EmailClient;
use crate::startup::ApplicationBaseUrl;
use actix_multipart::form::{MultipartForm, text::Text};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, post, web};
use anyhow::Context;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Fields of the subscribe form, posted as multipart/form-data.
#[derive(MultipartForm)]
pub struct FormData {
    pub first: Text<String>,
    pub last: Text<String>,
    pub email: Text<String>,
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    /// The email is already subscribed. Reported with the status text the
    /// subscribe page matches on, so the conflict surfaces as a business
    /// outcome rather than a hard failure.
    #[error("{}", crate::page::DUPLICATE_EMAIL)]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn error_response(&self) -> HttpResponse {
        match self {
            SubscribeError::ValidationError(_) => HttpResponse::new(StatusCode::BAD_REQUEST),
            SubscribeError::DuplicateEmail => {
                HttpResponse::build(StatusCode::CONFLICT).body(self.to_string())
            }
            SubscribeError::UnexpectedError(_) => {
                HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(form, db_pool, email_client, base_url),
    fields(
        subscriber_email = %form.0.email.0,
        subscriber_first = %form.0.first.0,
    )
)]
#[post("/subscriptions")]
pub async fn subscribe(
    form: MultipartForm<FormData>,
    db_pool: web::Data<SqlitePool>,
    email_client: web::Data<EmailClient>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, SubscribeError> {
    let new_subscriber: NewSubscriber = form
        .0
        .try_into()
        .map_err(SubscribeError::ValidationError)?;

    if subscriber_exists(&db_pool, &new_subscriber.email)
        .await
        .context("Failed to check for an existing subscriber")?
    {
        return Err(SubscribeError::DuplicateEmail);
    }

    insert_subscriber(&db_pool, &new_subscriber).await?;

    send_welcome_email(&email_client, &new_subscriber, &base_url.get_ref().0)
        .await
        .context("Failed to send the welcome email")?;

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(name = "Checking for an existing subscriber", skip(db_pool, email))]
pub async fn subscriber_exists(
    db_pool: &SqlitePool,
    email: &SubscriberEmail,
) -> Result<bool, sqlx::Error> {
    let existing = sqlx::query("SELECT id FROM subscribers WHERE email = ?")
        .bind(email.as_ref())
        .fetch_optional(db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
    Ok(existing.is_some())
}

#[tracing::instrument(
    name = "Saving new subscriber details in the database",
    skip(db_pool, new_subscriber)
)]
pub async fn insert_subscriber(
    db_pool: &SqlitePool,
    new_subscriber: &NewSubscriber,
) -> Result<(), SubscribeError> {
    sqlx::query(
        r#"
        INSERT INTO subscribers (id, first, last, email, subscribed_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(new_subscriber.first.as_ref())
    .bind(new_subscriber.last.as_ref())
    .bind(new_subscriber.email.as_ref())
    .bind(Utc::now())
    .execute(db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        // Two concurrent submissions can both pass the existence check;
        // the loser must still surface as a duplicate, not a failure.
        if e.as_database_error()
            .is_some_and(|db_error| db_error.is_unique_violation())
        {
            SubscribeError::DuplicateEmail
        } else {
            SubscribeError::UnexpectedError(
                anyhow::Error::new(e).context("Failed to store the new subscriber"),
            )
        }
    })?;
    Ok(())
}

#[tracing::instrument(
    name = "Sending a welcome email to a new subscriber",
    skip(email_client, new_subscriber, base_url)
)]
pub async fn send_welcome_email(
    email_client: &EmailClient,
    new_subscriber: &NewSubscriber,
    base_url: &str,
) -> Result<(), reqwest::Error> {
    let html_body = format!(
        "Hello {first},<br />\
        Thanks for subscribing to the newsletter!<br />\
        The latest posts are always at <a href=\"{base_url}\">{base_url}</a>.",
        first = new_subscriber.first,
    );
    let text_body = format!(
        "Hello {first},\n\
        Thanks for subscribing to the newsletter!\n\
        The latest posts are always at {base_url}.",
        first = new_subscriber.first,
    );
    email_client
        .send_email(
            &new_subscriber.email,
            "Welcome to the newsletter",
            &html_body,
            &text_body,
        )
        .await
}
