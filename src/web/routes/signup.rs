use axum::{
    body::{self, Body},
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::{
    email_client::SignupNotifier,
    web::{
        types::{SignupRequest, SignupResponse},
        Error, WebResult,
    },
    AppState,
};

/// Largest body read into memory. Anything bigger is a read failure.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// What a successfully processed request turns into.
#[derive(Debug)]
pub enum SignupOutcome {
    /// CORS preflight, answered with an empty body.
    Preflight,
    /// The notification went out.
    Added(SignupResponse),
}

impl IntoResponse for SignupOutcome {
    fn into_response(self) -> Response {
        match self {
            SignupOutcome::Preflight => StatusCode::NO_CONTENT.into_response(),
            SignupOutcome::Added(body) => (StatusCode::OK, Json(body)).into_response(),
        }
    }
}

/// The single entry point: every method on every path ends up here.
#[tracing::instrument(name = "Waitlist signup", skip(app_state, body))]
pub async fn waitlist_signup(
    State(app_state): State<AppState>,
    method: Method,
    body: Body,
) -> WebResult<SignupOutcome> {
    process_signup(&app_state.email_client, &method, body).await
}

/// Host independent request processing.
///
/// `OPTIONS` short-circuits, anything but `POST` is refused, and only then is the body read,
/// parsed as JSON, the email validated and exactly one notification forwarded.
/// Unreadable or unparseable bodies end up in the same generic failure as an unreachable email API.
pub async fn process_signup<N>(notifier: &N, method: &Method, body: Body) -> WebResult<SignupOutcome>
where
    N: SignupNotifier,
{
    if *method == Method::OPTIONS {
        return Ok(SignupOutcome::Preflight);
    }
    if *method != Method::POST {
        return Err(Error::MethodNotAllowed(method.clone()));
    }

    let body = body::to_bytes(body, BODY_LIMIT)
        .await
        .map_err(Error::BodyRead)?;

    let value: Value = serde_json::from_slice(&body)?;
    if value.is_null() {
        return Err(Error::NullBody);
    }

    let subscriber = SignupRequest::from_json(&value).valid_email()?;

    notifier.notify_signup(&subscriber).await?;

    info!("New waitlist signup forwarded.");
    Ok(SignupOutcome::Added(SignupResponse::added()))
}
