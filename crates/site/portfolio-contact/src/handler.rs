use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::ContactConfig;
use crate::error::ContactError;
use crate::mailto::{is_valid_email, mailto_link};

pub const SUCCESS_MESSAGE: &str = "Message received! Opening your email client...";

/// Raw form body. Every field is optional so missing and empty values get
/// the same error.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A form with every field present and a well-formed email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl TryFrom<ContactForm> for Submission {
    type Error = ContactError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        fn required(field: Option<String>) -> Result<String, ContactError> {
            field
                .filter(|v| !v.is_empty())
                .ok_or(ContactError::MissingFields)
        }

        let submission = Submission {
            name: required(form.name)?,
            email: required(form.email)?,
            subject: required(form.subject)?,
            message: required(form.message)?,
        };
        if !is_valid_email(&submission.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(submission)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub mailto_link: String,
}

/// `POST /api/contact`
pub async fn contact_handler(
    State(cfg): State<Arc<ContactConfig>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>, ContactError> {
    let Json(form) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonSyntaxError(_)
        | JsonRejection::JsonDataError(_)
        | JsonRejection::MissingJsonContentType(_) => ContactError::InvalidBody,
        other => ContactError::Internal(other.body_text()),
    })?;
    let submission = Submission::try_from(form)?;

    tracing::info!(
        name = %submission.name,
        email = %submission.email,
        subject = %submission.subject,
        message_len = submission.message.len(),
        "contact form submission"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        mailto_link: mailto_link(
            &cfg.recipient,
            &submission.name,
            &submission.email,
            &submission.subject,
            &submission.message,
        ),
    }))
}
