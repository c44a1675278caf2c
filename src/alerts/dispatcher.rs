use crate::alerts::email::EmailSender;
use crate::alerts::matcher::{PriceChangeEvent, TriggeredAlert};
use crate::alerts::templates;
use crate::db::{Database, DatabaseError, DatabaseProduct, DeliveryLogEntry};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub delivered: u32,
    pub failed: u32,
}

/// Turns matched alerts into delivery attempts and records each outcome.
/// Does not deduplicate against `last_sent_at`: the matcher's crossing rules
/// are the only duplicate-suppression mechanism.
pub struct NotificationDispatcher<'a> {
    sender: &'a EmailSender,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(sender: &'a EmailSender) -> Self {
        Self { sender }
    }

    /// Processes every triggered alert independently: a failed send is
    /// logged with `email_sent: false` and counted, never fatal to the
    /// batch. Store write errors do abort the pass. Ordering is
    /// send-then-log; a crash after a successful send but before the log
    /// write may duplicate one notification on a manual re-run.
    pub async fn dispatch(
        &self,
        db: &Database,
        product: &DatabaseProduct,
        event: &PriceChangeEvent,
        triggered: &[TriggeredAlert],
    ) -> Result<DispatchSummary, DatabaseError> {
        let mut summary = DispatchSummary::default();
        for matched in triggered {
            let email = templates::render(&product.name, event, &matched.reason);
            let email_sent = match self
                .sender
                .send(&matched.alert.email, &email.subject, &email.html_body, true)
                .await
            {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        alert_id = matched.alert.id,
                        error = %err,
                        "failed to deliver price alert email"
                    );
                    false
                }
            };
            db.append_delivery_log(DeliveryLogEntry {
                alert_id: matched.alert.id,
                triggered_at: event.occurred_at,
                old_price: event.old_price,
                new_price: event.new_price,
                email_sent,
            })
            .await?;
            if email_sent {
                db.update_last_sent(matched.alert.id, event.occurred_at).await?;
                summary.delivered += 1;
            } else {
                summary.failed += 1;
            }
        }
        Ok(summary)
    }
}
