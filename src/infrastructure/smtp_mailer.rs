// src/infrastructure/smtp_mailer.rs
//
// lettre-backed mail transport. The SMTP send itself is blocking, so it runs
// on a blocking task.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};

use crate::application::ports::{Mailer, OutgoingMail};
use crate::config::SmtpConfig;
use crate::error::NotifyError;

pub struct SmtpMailer {
    config: SmtpConfig,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = if config.use_tls {
            SmtpTransport::relay(&config.smtp_host)
                .map_err(|e| NotifyError::Config(format!("smtp relay configuration: {}", e)))?
                .port(config.smtp_port)
                .credentials(credentials)
                .build()
        } else {
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(credentials)
                .build()
        };

        Ok(Self { config, transport })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, NotifyError> {
        let from = if let Some(ref name) = self.config.from_name {
            format!("{} <{}>", name, self.config.from_address)
        } else {
            self.config.from_address.clone()
        };

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| NotifyError::Config(format!("invalid from address: {}", e)))?,
            )
            .to(mail
                .receiver
                .parse()
                .map_err(|e| NotifyError::Mail(format!("invalid receiver address: {}", e)))?)
            .subject(&mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.body.clone())
            .map_err(|e| NotifyError::Mail(format!("failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let message = self.build_message(mail)?;
        let transport = self.transport.clone();

        let result = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| NotifyError::Mail(format!("send task failed: {}", e)))?;

        result
            .map(|_| ())
            .map_err(|e| NotifyError::Mail(format!("smtp delivery failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "notify@example.com".to_string(),
            password: "secret".to_string(),
            from_address: "noreply@example.com".to_string(),
            from_name: Some("Content Notify".to_string()),
            use_tls: true,
        }
    }

    fn mail(receiver: &str) -> OutgoingMail {
        OutgoingMail {
            subject: "Content about to be unpublished".to_string(),
            receiver: receiver.to_string(),
            body: "digest".to_string(),
            langcode: "en".to_string(),
        }
    }

    #[test]
    fn test_mailer_creation() {
        assert!(SmtpMailer::new(config()).is_ok());
    }

    #[test]
    fn test_build_message_with_valid_receiver() {
        let mailer = SmtpMailer::new(config()).unwrap();
        assert!(mailer.build_message(&mail("editor@example.com")).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_receiver() {
        let mailer = SmtpMailer::new(config()).unwrap();
        let err = mailer.build_message(&mail("not-an-address")).unwrap_err();
        assert!(matches!(err, NotifyError::Mail(_)));
    }
}
