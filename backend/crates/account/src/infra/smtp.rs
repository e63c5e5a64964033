//! SMTP Verification Mailer
//!
//! Sends the verification link over SMTP. Without an SMTP host the mailer
//! only logs the link, which is enough for local development.

use std::fmt;

use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox};

use crate::domain::repository::{MailError, VerificationEmail, VerificationMailer};

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// `Name <address>` or a bare address
    pub from: String,
    /// TLS relay (STARTTLS/implicit) when true, plaintext otherwise (e.g. mailpit)
    pub tls: bool,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("tls", &self.tls)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| MailError(format!("invalid sender address: {e}")))?;

        let builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError(format!("invalid SMTP relay: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let mut builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from: Some(from),
        })
    }

    /// Log-only mailer
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }
}

impl VerificationMailer for SmtpMailer {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), MailError> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::info!(
                to = %email.to,
                verification_url = %email.verification_url,
                "SMTP disabled; verification link not mailed"
            );
            return Ok(());
        };

        let to: Mailbox = email
            .to
            .as_str()
            .parse()
            .map_err(|e| MailError(format!("invalid recipient address: {e}")))?;

        let text = format!(
            "Hello {},\n\nPlease confirm your email address by opening the link below:\n\n{}\n",
            email.nickname, email.verification_url
        );
        let html = format!(
            "<p>Hello {},</p><p>Please confirm your email address:</p>\
             <p><a href=\"{url}\">{url}</a></p>",
            email.nickname,
            url = email.verification_url
        );

        let message = Message::builder()
            .from(from.clone())
            .to(to)
            .subject("Verify your email address")
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| MailError(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| MailError(e.to_string()))?;

        tracing::info!(to = %email.to, "Verification email sent");
        Ok(())
    }
}
