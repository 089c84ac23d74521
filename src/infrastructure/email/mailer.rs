use std::time::Duration;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use zeroize::Zeroizing;

use crate::settings::AppConfig;

use super::{CareerEmail, Mailer};

/// SMTP transport over the configured relay. Credentials may legitimately be
/// absent outside production; sending then fails at call time, which the
/// pipeline maps to a delivery error.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    has_credentials: bool,
}

impl SmtpMailer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let has_credentials =
            !config.email_user.trim().is_empty() && !config.email_password.trim().is_empty();

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .timeout(Some(Duration::from_secs(config.external_timeout_secs)));

        if has_credentials {
            let password = Zeroizing::new(config.email_password.clone());
            builder = builder.credentials(Credentials::new(
                config.email_user.clone(),
                password.as_str().to_owned(),
            ));
        }

        Ok(SmtpMailer {
            transport: builder.build(),
            from: config.email_user.clone(),
            has_credentials,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: CareerEmail) -> anyhow::Result<()> {
        if !self.has_credentials {
            bail!("E-posta kimlik bilgileri eksik");
        }

        let mut body = MultiPart::mixed().singlepart(SinglePart::html(email.html_body));
        for attachment in email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)?;
            body = body.singlepart(
                Attachment::new(attachment.filename).body(attachment.content, content_type),
            );
        }

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(email.recipient.parse()?)
            .subject(email.subject)
            .multipart(body)?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            bail!("SMTP rejected message: {}", response.code());
        }
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
