use std::net::SocketAddr;

use clap::Parser;

/// Mailbox the generated `mailto:` links point at.
pub const DEFAULT_RECIPIENT: &str = "muthumanoj100@gmail.com";

/// Runtime settings shared by every request.
#[derive(Clone, Debug)]
pub struct ContactConfig {
    pub recipient: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

/// Command-line arguments for the contact server
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-contact", version, about = "Portfolio contact form endpoint")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "CONTACT_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Recipient address for generated mailto links
    #[arg(long, env = "CONTACT_RECIPIENT", default_value = DEFAULT_RECIPIENT)]
    pub recipient: String,
}

impl ServerArgs {
    pub fn contact_config(&self) -> ContactConfig {
        ContactConfig {
            recipient: self.recipient.clone(),
        }
    }
}
