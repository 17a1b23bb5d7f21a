use chrono::Local;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::{Notifier, NotifyFuture, format};
use crate::companies::Company;
use crate::core::{EmailSettings, IsError, TransactionRecord};
use crate::tracker::RunSummary;

/// Sends HTML emails over SMTP with STARTTLS.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl std::fmt::Debug for EmailNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailNotifier")
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .finish_non_exhaustive()
    }
}

fn notify_err(context: &str, e: impl std::fmt::Display) -> IsError {
    IsError::Notify(format!("{context}: {e}"))
}

impl EmailNotifier {
    /// Build a notifier from complete email settings.
    ///
    /// # Errors
    ///
    /// Returns [`IsError::Config`] when a credential or the recipient is missing,
    /// and [`IsError::Notify`] when an address or the relay host is invalid.
    pub fn new(settings: &EmailSettings) -> Result<Self, IsError> {
        let (Some(user), Some(password), Some(recipient)) = (
            settings.user.as_deref(),
            settings.password.as_deref(),
            settings.recipient.as_deref(),
        ) else {
            return Err(IsError::Config(
                "EMAIL_USER, EMAIL_PASS and RECIPIENT_EMAIL are required for email notifications".into(),
            ));
        };

        let from: Mailbox = user.parse().map_err(|e| notify_err("sender address", e))?;
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| notify_err("recipient address", e))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            .map_err(|e| notify_err("smtp relay", e))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, from, to })
    }

    async fn send_html(&self, subject: String, html: String) -> Result<(), IsError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| notify_err("building email", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| notify_err("sending email", e))?;
        info!("Email notification sent to {}", self.to);
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    fn notify_new_transactions<'a>(
        &'a self,
        company: &'a Company,
        source_url: &'a str,
        transactions: &'a [TransactionRecord],
    ) -> NotifyFuture<'a> {
        Box::pin(async move {
            if transactions.is_empty() {
                debug!("No new transactions to notify for {}", company.slug);
                return Ok(());
            }
            let subject = format::alert_subject(&company.name, transactions.len());
            let html = format::alert_html(company, source_url, transactions, Local::now());
            self.send_html(subject, html).await
        })
    }

    fn notify_summary<'a>(&'a self, summary: &'a RunSummary) -> NotifyFuture<'a> {
        Box::pin(async move {
            if summary.companies_with_new_transactions().next().is_none() {
                debug!("No changes detected, skipping summary email");
                return Ok(());
            }
            let subject = format::summary_subject(summary);
            let html = format::summary_html(summary, Local::now());
            self.send_html(subject, html).await
        })
    }
}
