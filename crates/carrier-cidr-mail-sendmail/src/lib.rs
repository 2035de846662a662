// # Sendmail Mail Transport
//
// Hands change notifications to the local MTA through its `sendmail`
// compatible interface.
//
// ## Invocation
//
// ```text
// <program> -t -i [-f <from>]
// ```
//
// - `-t`: recipients are read from the `To:` header
// - `-i`: a lone `.` line does not end the message
// - `-f`: envelope sender, only when a from address is configured
//
// The rendered message is written to the child's stdin. A spawn failure or
// a nonzero exit status is a transport failure and is never retried.

use carrier_cidr_core::traits::{MailMessage, MailTransport};
use carrier_cidr_core::{Error, Result};

use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default location of the sendmail interface
pub const DEFAULT_SENDMAIL_PROGRAM: &str = "/usr/sbin/sendmail";

/// Mail transport backed by a local sendmail program
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
}

impl SendmailTransport {
    /// Create a transport invoking `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program this transport invokes
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn command(&self, message: &MailMessage) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-t").arg("-i");
        if let Some(from) = &message.from {
            command.arg("-f").arg(from);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL_PROGRAM)
    }
}

#[async_trait::async_trait]
impl MailTransport for SendmailTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let rendered = render_message(message, chrono::Local::now().to_rfc2822());

        let mut child = self.command(message).spawn().map_err(|e| {
            Error::transport(format!(
                "Failed to spawn {}: {}",
                self.program.display(),
                e
            ))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(rendered.as_bytes()).await {
                Ok(()) => {}
                // The exit status below says whether the message was taken
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("{} closed stdin early", self.program.display());
                }
                Err(e) => {
                    return Err(Error::transport(format!("Failed to write message: {}", e)));
                }
            }
            // Dropping stdin closes the pipe so sendmail sees EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::transport(format!("Failed to wait for sendmail: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::transport(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(
            "Handed message '{}' to {}",
            message.subject,
            self.program.display()
        );
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "sendmail"
    }
}

/// Render headers and body as an RFC 5322 message
///
/// `date` is the value of the `Date:` header.
pub fn render_message(message: &MailMessage, date: String) -> String {
    let mut out = String::new();

    if let Some(from) = &message.from {
        out.push_str(&format!("From: {}\n", from));
    }
    out.push_str(&format!("To: {}\n", message.to.join(", ")));
    out.push_str(&format!("Subject: {}\n", message.subject));
    out.push_str(&format!("Date: {}\n", date));
    out.push_str("MIME-Version: 1.0\n");
    out.push_str("Content-Type: text/plain; charset=UTF-8\n");
    out.push('\n');
    out.push_str(&message.body);
    if !message.body.ends_with('\n') {
        out.push('\n');
    }

    out
}
