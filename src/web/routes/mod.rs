//! Contains all the routes that this application can handle.

mod signup;

pub use signup::{process_signup, waitlist_signup, SignupOutcome};

use axum::Router;

use crate::AppState;

/// The signup handler answers every method on every path.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .fallback(waitlist_signup)
        .with_state(app_state)
}
