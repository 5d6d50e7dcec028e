//! Background notification delivery.
//!
//! Workflow handlers hand transition notifications to a background worker
//! over an in-process channel and never wait on the insert. Delivery is
//! best-effort: a failed insert is logged and the worker moves on, so a
//! notification failure can never roll back or fail the transition that
//! produced it.

use meemar_db::models::notification::NewNotification;
use meemar_db::repositories::NotificationRepo;
use meemar_db::DbPool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cheaply cloneable handle for enqueueing notifications.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<NewNotification>,
}

impl Notifier {
    /// Spawn the delivery worker and return a handle to it.
    ///
    /// The worker runs until every [`Notifier`] clone has been dropped and
    /// the channel drains.
    pub fn spawn(pool: DbPool) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(deliver_loop(pool, rx));
        (Self { tx }, handle)
    }

    /// Enqueue a notification for background delivery. Never blocks.
    pub fn enqueue(&self, notification: NewNotification) {
        if self.tx.send(notification).is_err() {
            tracing::warn!("Notification worker is gone, dropping notification");
        }
    }
}

/// Drain the channel, inserting one notification row per message.
async fn deliver_loop(pool: DbPool, mut rx: mpsc::UnboundedReceiver<NewNotification>) {
    while let Some(input) = rx.recv().await {
        if let Err(e) = NotificationRepo::create(&pool, &input).await {
            tracing::error!(
                error = %e,
                notification_type = %input.notification_type,
                recipient_id = input.recipient_id,
                "Failed to deliver notification"
            );
        }
    }
    tracing::info!("Notification channel closed, delivery worker shutting down");
}
