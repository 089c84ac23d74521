use async_trait::async_trait;

pub mod mailer;
pub mod message;

pub use mailer::SmtpMailer;

/// One file attached to an outbound notification.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

/// A fully composed notification, ready for a transport.
#[derive(Debug, Clone)]
pub struct CareerEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Outbound mail transport. `send` is at-most-once: a failure is surfaced to
/// the caller and the message is not retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: CareerEmail) -> anyhow::Result<()>;

    async fn ping(&self) -> anyhow::Result<()>;
}
