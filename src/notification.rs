//! Mail dispatch
//!
//! Builds the multipart/alternative workout message and hands it to a
//! `MailTransport`. The production transport submits through the configured
//! relay over STARTTLS with login credentials, one unpooled connection per
//! message.
//! Transport failures are logged here and reported as `Delivery::Failed`;
//! they never propagate to the caller.

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::MailerError;
use crate::types::{Delivery, SmtpSettings, WorkoutEmail};

/// Submits one finished message to its recipient
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn submit(&self, message: Message) -> Result<(), MailerError>;
}

/// Relay submission over STARTTLS with login credentials
pub struct SmtpRelay {
    settings: SmtpSettings,
}

impl SmtpRelay {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let credentials = Credentials::new(
            self.settings.sender.email.to_string(),
            self.settings.password.clone(),
        );
        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.server)?
                .port(self.settings.port)
                .credentials(credentials)
                .build(),
        )
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn submit(&self, message: Message) -> Result<(), MailerError> {
        log::info!(
            "Connecting to SMTP server: {}:{}",
            self.settings.server,
            self.settings.port
        );
        // Dropped at the end of this call, which closes the session.
        let transport = self.transport()?;
        transport.send(message).await?;
        Ok(())
    }
}

/// Build the message: plain-text part plus the rendered HTML alternative
pub fn build_message(settings: &SmtpSettings, email: &WorkoutEmail) -> Result<Message, MailerError> {
    let message = Message::builder()
        .from(settings.sender.clone())
        .to(settings.recipient.clone())
        .subject(email.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            email.plain.clone(),
            email.html.clone(),
        ))?;
    Ok(message)
}

/// Send one workout email. Failures are logged and returned as a value.
pub async fn dispatch(
    transport: &dyn MailTransport,
    settings: &SmtpSettings,
    email: &WorkoutEmail,
) -> Delivery {
    log::info!(
        "Preparing to send email to {} with subject '{}'",
        settings.recipient,
        email.subject
    );

    let message = match build_message(settings, email) {
        Ok(message) => message,
        Err(e) => {
            log::error!("{}", e);
            return Delivery::Failed(e.to_string());
        }
    };

    match transport.submit(message).await {
        Ok(()) => {
            log::info!("Email sent successfully to {}.", settings.recipient);
            Delivery::Sent
        }
        Err(e) => {
            log::error!("{}", e);
            Delivery::Failed(e.to_string())
        }
    }
}
