//! Most of the structs in `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_regex::regex_is_match;
use serde::Serialize;
use serde_json::Value;

// ###################################
// ->   STRUCTS
// ###################################

/// The signup submission as received from the browser.
/// `email` is `None` when the field is absent or not a JSON string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: Option<String>,
}

impl SignupRequest {
    /// Picks the `email` out of an arbitrary JSON value.
    /// Anything that isn't an object carrying a string `email` yields an empty request.
    pub fn from_json(value: &Value) -> Self {
        let email = value
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self { email }
    }

    pub fn valid_email(&self) -> Result<ValidEmail, DataParsingError> {
        match self.email.as_deref() {
            Some(email) => ValidEmail::parse(email),
            None => Err(DataParsingError::EmailMissing),
        }
    }
}

/// Validated Email
///
/// A minimal `local@domain.tld` shape: no whitespace and exactly one `@`,
/// with at least one `.` in the domain part. No DNS or mailbox checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if is_valid_email(Some(value)) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// Pure syntactic check of a candidate email.
/// Absent input is never valid.
pub fn is_valid_email(candidate: Option<&str>) -> bool {
    candidate.is_some_and(|email| regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email))
}

/// The notification sent to the team inbox for every accepted signup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl NotificationMessage {
    pub fn waitlist_signup(
        sender: &ValidEmail,
        recipient: &ValidEmail,
        subscriber: &ValidEmail,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let subscriber = subscriber.as_ref();
        let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

        let subject = format!("New Waitlist Signup: {subscriber}");
        let html = format!(
            "<h2>New Waitlist Signup</h2>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Timestamp:</strong> {timestamp}</p>",
            escape_html(subscriber)
        );

        Self {
            from: sender.as_ref().to_owned(),
            to: recipient.as_ref().to_owned(),
            subject,
            html,
        }
    }
}

/// Successful signup body: `{ "success": true, "message": ... }`
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SignupResponse {
    pub fn added() -> Self {
        Self {
            success: true,
            message: "Added to waitlist!",
        }
    }
}

// ###################################
// ->   HELPERS
// ###################################

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email missing")]
    EmailMissing,
    #[error("email invalid")]
    EmailInvalid,
}
