//! Waitlist signup endpoint.
//!
//! Accepts `{ "email": ... }` over `POST`, validates the address and forwards a single
//! notification to the transactional email API. Nothing is stored.

pub mod app;
pub mod config;
pub mod email_client;
mod error;
pub mod web;

pub use app::{serve, App, AppState};
pub use email_client::EmailClient;
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Compact, timestamp-less output for local development.
/// `RUST_LOG` overrides the default `debug` filter.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Full format without ANSI colors, for the host's log sink.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
