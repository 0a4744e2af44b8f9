use std::future::Future;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::web::types::{NotificationMessage, ValidEmail};

/// Anything that can tell the team about a new waitlist signup.
/// `EmailClient` is the production implementation.
pub trait SignupNotifier: Send + Sync {
    fn notify_signup(&self, subscriber: &ValidEmail) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub sender: ValidEmail,
    pub recipient: ValidEmail,
    auth_token: SecretString,
}

impl EmailClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        sender: ValidEmail,
        recipient: ValidEmail,
        auth_token: SecretString,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().build()?;

        Ok(EmailClient {
            http_client,
            url,
            sender,
            recipient,
            auth_token,
        })
    }

    /// Posts a single message to the `emails` endpoint. No retries.
    /// Any non-2xx reply is an error carrying the upstream body.
    pub async fn send_email(&self, message: &NotificationMessage) -> Result<()> {
        let url = self
            .url
            .join("emails")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|er| format!("<unreadable body: {er}>"));
            return Err(Error::UnsuccessfulStatus { status, body });
        }

        Ok(())
    }
}

impl SignupNotifier for EmailClient {
    #[tracing::instrument(name = "Forwarding waitlist signup", skip(self, subscriber))]
    async fn notify_signup(&self, subscriber: &ValidEmail) -> Result<()> {
        let message =
            NotificationMessage::waitlist_signup(&self.sender, &self.recipient, subscriber, Utc::now());

        self.send_email(&message).await?;

        tracing::info!("Signup notification accepted by the email API.");
        Ok(())
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("email API replied with {status}: {body}")]
    UnsuccessfulStatus { status: StatusCode, body: String },

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
