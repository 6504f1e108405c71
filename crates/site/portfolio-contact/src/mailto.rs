//! Email validation and `mailto:` link construction.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Loose shape check: something, `@`, something, `.`, something, no spaces.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// `mailto:<recipient>?subject=..&body=..` with both parameters percent-encoded.
/// The body reads `From: <name> (<email>)`, a blank line, then the message.
pub fn mailto_link(recipient: &str, name: &str, email: &str, subject: &str, message: &str) -> String {
    let body = format!("From: {name} ({email})\n\n{message}");
    format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(&body)
    )
}
