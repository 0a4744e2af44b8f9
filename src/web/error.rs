use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::email_client;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed: {0}")]
    MethodNotAllowed(Method),
    #[error("request body is JSON null")]
    NullBody,
    #[error("failed to read request body: {0}")]
    BodyRead(axum::Error),

    #[error("data parsing error: {0}")]
    DataParsing(#[from] super::types::DataParsingError),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("email client error: {0}")]
    EmailClient(#[from] email_client::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::DataParsing(_) => (StatusCode::BAD_REQUEST, InvalidEmail),
            Error::EmailClient(email_client::Error::UnsuccessfulStatus { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SubscribeFailed)
            }
            Error::NullBody
            | Error::BodyRead(_)
            | Error::MalformedBody(_)
            | Error::EmailClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a placeholder, `response_mapper` writes the real body.
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the caller gets to see. The `Display` output is the `error` field of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Valid email required")]
    InvalidEmail,
    #[display("Failed to subscribe")]
    SubscribeFailed,
    #[display("Internal server error")]
    ServiceError,
}
