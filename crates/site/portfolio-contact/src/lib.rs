//! Portfolio contact endpoint.
//!
//! A single `POST /api/contact` route that validates a contact form and
//! answers with a `mailto:` link for the visitor's mail client. Nothing is
//! stored or sent server-side.

pub mod config;
pub mod error;
pub mod handler;
pub mod mailto;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::{ContactConfig, ServerArgs, DEFAULT_RECIPIENT};
pub use error::ContactError;
pub use handler::{ContactForm, ContactResponse, Submission};

pub const CONTACT_PATH: &str = "/api/contact";

/// Build the application router.
pub fn router(cfg: ContactConfig) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(handler::contact_handler))
        .with_state(Arc::new(cfg))
        .layer(TraceLayer::new_for_http())
}
