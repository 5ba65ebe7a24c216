//! Email digest notifications for newly discovered jobs.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::EmailSettings;
use crate::domain::models::JobRecord;
use crate::error::{AppError, Result};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a digest for a batch of newly stored jobs.
    async fn notify(&self, jobs: &[JobRecord]) -> Result<()>;
}

pub const DIGEST_SUBJECT: &str = "New Junior Job Postings in Israel";

/// Render the plaintext digest, one block per job.
pub fn digest_body(jobs: &[JobRecord]) -> String {
    let mut body = String::from("Here are the new junior job postings in Israel:\n\n");
    for job in jobs {
        body.push_str(&format!(
            "Company: {}\nTitle: {}\nLocation: {}\nLink: {}\n\n",
            job.company, job.title, job.location, job.link
        ));
    }
    body
}

/// SMTP digest sender. Jobs are already persisted by the time this runs, so
/// a delivery failure is reported to the caller but changes nothing.
pub struct SmtpNotifier {
    settings: EmailSettings,
}

impl SmtpNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    fn build_message(&self, jobs: &[JobRecord]) -> Result<Message> {
        Message::builder()
            .from(
                self.settings
                    .sender
                    .parse()
                    .map_err(|e| AppError::notify(format!("invalid sender address: {e}")))?,
            )
            .to(self
                .settings
                .receiver
                .parse()
                .map_err(|e| AppError::notify(format!("invalid receiver address: {e}")))?)
            .subject(DIGEST_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(digest_body(jobs))
            .map_err(|e| AppError::notify(format!("failed to build digest message: {e}")))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, jobs: &[JobRecord]) -> Result<()> {
        if jobs.is_empty() {
            tracing::info!("No new jobs to notify about");
            return Ok(());
        }
        if !self.settings.enabled {
            tracing::info!(jobs = jobs.len(), "Email disabled, skipping digest");
            return Ok(());
        }

        let message = self.build_message(jobs)?;
        let creds = Credentials::new(
            self.settings.smtp_user.clone(),
            self.settings.smtp_pass.clone(),
        );
        let mailer = SmtpTransport::starttls_relay(&self.settings.smtp_server)
            .map_err(|e| AppError::notify(format!("SMTP relay setup failed: {e}")))?
            .port(self.settings.smtp_port)
            .credentials(creds)
            .build();

        // lettre's SMTP transport is blocking; keep it off the runtime.
        let sent = tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| AppError::notify(format!("SMTP send task failed: {e}")))?;

        match sent {
            Ok(_) => {
                tracing::info!(jobs = jobs.len(), "Digest email sent");
                Ok(())
            }
            Err(e) => Err(AppError::notify(format!("failed to send digest: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn digest_lists_one_block_per_job() {
        let jobs = vec![
            fixtures::job("acme", "Junior Developer", "Tel Aviv"),
            fixtures::job("globex", "Junior QA", "Haifa"),
        ];

        let body = digest_body(&jobs);
        assert!(body.starts_with("Here are the new junior job postings in Israel:"));
        assert!(body.contains("Company: acme\nTitle: Junior Developer\nLocation: Tel Aviv\n"));
        assert!(body.contains("Company: globex\nTitle: Junior QA\nLocation: Haifa\n"));
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let notifier = SmtpNotifier::new(EmailSettings::default());
        assert!(notifier.notify(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn disabled_email_is_a_quiet_success() {
        // No SMTP server configured; must not attempt a connection.
        let notifier = SmtpNotifier::new(EmailSettings::default());
        let jobs = vec![fixtures::job("acme", "Junior Developer", "Tel Aviv")];
        assert!(notifier.notify(&jobs).await.is_ok());
    }
}
