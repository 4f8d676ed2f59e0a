//! Best-effort email notifications using lettre

use crate::config::EmailConfig;
use crate::store::ContactSubmission;
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info};

/// Outbound mail dispatcher
///
/// When SMTP credentials are absent the service is inert: send calls log and
/// return Ok instead of failing, so a missing mail setup never breaks the
/// contact form.
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
    notify_address: String,
    auto_reply: bool,
    configured: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let configured =
            !config.smtp_username.is_empty() && !config.smtp_password.is_empty();

        let mailer = if configured {
            // SmtpTransport::relay() uses STARTTLS by default, which is
            // appropriate for most SMTP servers on port 587
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            info!("SMTP credentials not configured, email notifications disabled");
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        };

        Ok(Self {
            mailer,
            from: format!("{} <{}>", config.from_name, config.from_email),
            notify_address: config.notify_address.clone(),
            auto_reply: config.auto_reply,
            configured,
        })
    }

    /// Whether the dispatcher has working credentials
    pub fn configured(&self) -> bool {
        self.configured
    }

    /// Notify the operator about a new submission
    pub fn send_notification(&self, submission: &ContactSubmission) -> Result<()> {
        if !self.configured {
            debug!("Email not configured, skipping contact notification");
            return Ok(());
        }

        let body = format!(
            "New Contact Form Submission\n\
             ============================\n\n\
             From: {} <{}>\n\
             Subject: {}\n\n\
             Message:\n\
             {}\n",
            submission.name, submission.email, submission.subject, submission.message
        );

        let email = Message::builder()
            .from(self.from.parse().context("Failed to parse from address")?)
            .to(self
                .notify_address
                .parse()
                .context("Failed to parse notification address")?)
            .subject(format!("New Contact: {}", submission.subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build notification email")?;

        self.mailer
            .send(&email)
            .context("Failed to send contact notification")?;

        info!(
            to = %self.notify_address,
            from_name = %submission.name,
            "Contact notification sent"
        );

        Ok(())
    }

    /// Thank the submitter for reaching out
    ///
    /// Only sent when auto-reply is enabled in configuration; later revisions
    /// of the contact form made this opt-in.
    pub fn send_auto_reply(&self, submission: &ContactSubmission) -> Result<()> {
        if !self.auto_reply {
            return Ok(());
        }
        if !self.configured {
            debug!("Email not configured, skipping auto-reply");
            return Ok(());
        }

        let body = format!(
            "Hello {},\n\n\
             Thank you for getting in touch through my portfolio website. I have\n\
             received your message and will get back to you as soon as possible.\n\n\
             Your message:\n\
             {}\n\n\
             Best regards\n\n\
             This is an automated response. Please do not reply to this email.\n",
            submission.name, submission.message
        );

        let email = Message::builder()
            .from(self.from.parse().context("Failed to parse from address")?)
            .to(submission
                .email
                .parse()
                .context("Failed to parse submitter address")?)
            .subject("Thank you for contacting me!")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build auto-reply email")?;

        self.mailer
            .send(&email)
            .context("Failed to send auto-reply")?;

        info!(to = %submission.email, "Auto-reply sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewContact;

    fn submission() -> ContactSubmission {
        ContactSubmission::placeholder(&NewContact {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Hi there, testing".to_string(),
        })
    }

    #[test]
    fn test_unconfigured_service_is_inert() {
        let service = EmailService::new(&EmailConfig::default()).unwrap();
        assert!(!service.configured());

        // No SMTP server is reachable in tests; inert mode must still be Ok
        assert!(service.send_notification(&submission()).is_ok());
        assert!(service.send_auto_reply(&submission()).is_ok());
    }

    #[test]
    fn test_auto_reply_disabled_is_noop() {
        let config = EmailConfig {
            smtp_username: "user".to_string(),
            smtp_password: "pass".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            auto_reply: false,
            ..EmailConfig::default()
        };
        let service = EmailService::new(&config).unwrap();
        assert!(service.configured());

        // Disabled auto-reply returns before touching the transport
        assert!(service.send_auto_reply(&submission()).is_ok());
    }
}
