// # Change Notification
//
// Mails a YAML summary of one carrier's change. Notification is strictly
// best-effort: it runs after the snapshot has been committed, and a
// transport failure never rolls that write back.
//
// ## Payload
//
// ```yaml
// docomo:
//   url: https://www.nttdocomo.co.jp/...
//   old:
//   - 210.153.84.0/24
//   new:
//   - 210.153.84.0/24
//   - 210.153.86.0/24
//   added:
//   - 210.153.86.0/24
// ```
//
// `added` and `deleted` are omitted when empty.

use crate::cidr::CidrEntry;
use crate::config::Recipients;
use crate::diff::DiffResult;
use crate::error::Result;
use crate::traits::{MailMessage, MailTransport};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything known about one carrier's change
#[derive(Debug, Clone, Copy)]
pub struct CarrierChange<'a> {
    /// Carrier short name
    pub carrier: &'a str,
    /// Where the ranges were scraped from
    pub source_url: &'a str,
    /// Previously committed set (empty if none)
    pub old: &'a [CidrEntry],
    /// Newly committed set
    pub new: &'a [CidrEntry],
    /// Element-level diff of `old` -> `new`
    pub diff: &'a DiffResult,
}

#[derive(Serialize)]
struct ChangePayload<'a> {
    url: &'a str,
    old: &'a [CidrEntry],
    new: &'a [CidrEntry],
    #[serde(skip_serializing_if = "is_empty")]
    added: &'a [CidrEntry],
    #[serde(skip_serializing_if = "is_empty")]
    deleted: &'a [CidrEntry],
}

fn is_empty(entries: &&[CidrEntry]) -> bool {
    entries.is_empty()
}

/// Sends change summaries through a [`MailTransport`]
pub struct Notifier {
    transport: Box<dyn MailTransport>,
    recipients: Recipients,
}

impl Notifier {
    /// Create a notifier
    pub fn new(transport: Box<dyn MailTransport>, recipients: Recipients) -> Self {
        Self {
            transport,
            recipients,
        }
    }

    /// Whether any message would be sent
    pub fn is_enabled(&self) -> bool {
        !self.recipients.is_empty()
    }

    /// Notify about one carrier's change
    ///
    /// # Returns
    ///
    /// - `Ok(false)`: no recipients, nothing was built or sent
    /// - `Ok(true)`: one message handed to the transport
    /// - `Err(Error::Transport)`: the transport failed (not retried)
    pub async fn notify(&self, change: &CarrierChange<'_>) -> Result<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let message = self.build_message(change)?;
        self.transport.send(&message).await?;

        tracing::info!(
            "Sent change notification for {} to {} recipient(s) via {}",
            change.carrier,
            message.to.len(),
            self.transport.transport_name()
        );
        Ok(true)
    }

    fn build_message(&self, change: &CarrierChange<'_>) -> Result<MailMessage> {
        Ok(MailMessage {
            from: self.recipients.from.clone(),
            to: self.recipients.to.clone(),
            subject: subject_for(change.carrier),
            body: render_payload(change)?,
        })
    }
}

/// Subject line for a carrier's change notification
pub fn subject_for(carrier: &str) -> String {
    format!("[carrier-cidr] {} gateway CIDR changed", carrier)
}

/// Render the YAML payload for one carrier
pub fn render_payload(change: &CarrierChange<'_>) -> Result<String> {
    let mut payload = BTreeMap::new();
    payload.insert(
        change.carrier,
        ChangePayload {
            url: change.source_url,
            old: change.old,
            new: change.new,
            added: &change.diff.added,
            deleted: &change.diff.deleted,
        },
    );
    Ok(serde_yaml_ng::to_string(&payload)?)
}
