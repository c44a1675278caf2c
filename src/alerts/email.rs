use crate::configuration::{EmailMode, EmailSettings};
use crate::errors::ConfigurationError;
use sendgrid::{Destination, Mail, SGClient};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("email transport error: {0}")]
    Transport(String),
    #[error("tokio task error: {0}")]
    TokioTaskError(#[from] tokio::task::JoinError),
}

/// Outbound email boundary. `LogOnly` is the test/dev mode: it records the
/// delivery in the log stream and reports success without sending anything.
pub enum EmailSender {
    LogOnly,
    SendGrid(SendGridSender),
    #[cfg(test)]
    Mock(mock::MockSender),
}

impl EmailSender {
    pub fn try_from(settings: &EmailSettings) -> Result<Self, ConfigurationError> {
        settings.check_if_valid()?;
        match settings.mode {
            EmailMode::LogOnly => Ok(Self::LogOnly),
            EmailMode::SendGrid => Ok(Self::SendGrid(SendGridSender::new(
                settings.api_key_unchecked(),
                settings.from_address_unchecked(),
            ))),
        }
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<(), EmailError> {
        match self {
            EmailSender::LogOnly => {
                info!(to, subject, is_html, "log-only email sender, skipping delivery");
                Ok(())
            }
            EmailSender::SendGrid(sender) => sender.send(to, subject, body, is_html).await,
            #[cfg(test)]
            EmailSender::Mock(sender) => sender.send(to, subject, body, is_html),
        }
    }
}

#[derive(Clone)]
pub struct SendGridSender {
    client: SGClient,
    from_address: String,
}

impl SendGridSender {
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            client: SGClient::new(api_key),
            from_address,
        }
    }

    /// The sendgrid client blocks, so the call is moved off the async
    /// runtime. Transport timeouts are the client's responsibility.
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<(), EmailError> {
        let client = self.client.clone();
        let from_address = self.from_address.clone();
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut mail = Mail::new()
                .add_to(Destination {
                    address: &to,
                    name: &to,
                })
                .add_from(&from_address)
                .add_subject(&subject);
            mail = if is_html {
                mail.add_html(&body)
            } else {
                mail.add_text(&body)
            };
            client.send(mail)
        })
        .await?;
        outcome
            .map(|_| ())
            .map_err(|e| EmailError::Transport(e.to_string()))
    }
}
