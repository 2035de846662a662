// # Mail Transport Trait
//
// Defines the interface for delivering change notifications.
//
// ## Implementations
//
// - Local sendmail: `carrier-cidr-mail-sendmail` crate

use async_trait::async_trait;

/// A fully addressed plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Sender address, if any
    pub from: Option<String>,
    /// Recipient addresses (never empty when handed to a transport)
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Trait for mail transport implementations
///
/// Transports send exactly once. Failures are returned as
/// `Error::Transport` and are never retried by the caller.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message
    async fn send(&self, message: &MailMessage) -> Result<(), crate::Error>;

    /// Transport name, for logging
    fn transport_name(&self) -> &'static str;
}
