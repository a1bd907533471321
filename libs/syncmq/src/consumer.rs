use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::broker::{connect_with_retry, Broker, BrokerError, ConnectOpts, Delivery};
use crate::change::{DeleteEvent, DeleteUser, EditEvent};

/// Port implemented by dependent services. Every handler must be
/// idempotent: the broker is at-least-once, and a message is redelivered
/// whenever it was applied but not yet acked before a restart.
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    async fn delete_user(&self, change: DeleteUser) -> anyhow::Result<()>;
    async fn edit_event(&self, change: EditEvent) -> anyhow::Result<()>;
    async fn delete_event(&self, change: DeleteEvent) -> anyhow::Result<()>;
}

/// Consuming half of the sync protocol: an explicitly constructed,
/// owned object with a `connect` / `run` / shutdown lifecycle. One
/// message is processed at a time; the ack is sent only after the
/// handler reported durable application.
pub struct SyncConsumer {
    broker: Arc<dyn Broker>,
    handler: Arc<dyn ChangeHandler>,
}

impl SyncConsumer {
    pub fn new(broker: Arc<dyn Broker>, handler: Arc<dyn ChangeHandler>) -> Self {
        Self { broker, handler }
    }

    /// Bounded-retry connect; fatal to startup on exhaustion.
    pub async fn connect(&self, opts: &ConnectOpts) -> Result<(), BrokerError> {
        connect_with_retry(self.broker.as_ref(), opts).await
    }

    /// Long-running consume loop. Returns when `cancel` fires or the
    /// broker closes the subscription. An in-flight unacked message at
    /// cancellation time stays pending for redelivery.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) -> anyhow::Result<()> {
        let mut sub = self.broker.subscribe().await?;
        info!("sync consumer started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("sync consumer cancelled, shutting down");
                    return Ok(());
                }
                delivery = sub.recv() => {
                    match delivery {
                        Some(d) => self.process(d).await,
                        None => {
                            info!("sync queue closed, consumer exiting");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn process(&self, delivery: Delivery) {
        let value: serde_json::Value = match serde_json::from_slice(&delivery.payload) {
            Ok(v) => v,
            Err(e) => {
                // Undecodable payloads can never succeed on redelivery:
                // ack and drop instead of poisoning the queue.
                warn!(error = %e, "dropping undecodable change message");
                Self::ack_or_warn(delivery).await;
                return;
            }
        };

        let message_type = value.get("message_type").and_then(serde_json::Value::as_u64);
        let applied = match message_type {
            Some(1) => match serde_json::from_value::<DeleteUser>(value) {
                Ok(change) => {
                    debug!(user_id = change.user_id, "applying DeleteUser");
                    Some(self.handler.delete_user(change).await)
                }
                Err(e) => {
                    warn!(error = %e, "malformed DeleteUser payload, dropping");
                    None
                }
            },
            Some(2) => match serde_json::from_value::<EditEvent>(value) {
                Ok(change) => {
                    debug!(event_id = change.event_id, "applying EditEvent");
                    Some(self.handler.edit_event(change).await)
                }
                Err(e) => {
                    warn!(error = %e, "malformed EditEvent payload, dropping");
                    None
                }
            },
            Some(3) => match serde_json::from_value::<DeleteEvent>(value) {
                Ok(change) => {
                    debug!(event_id = change.event_id, "applying DeleteEvent");
                    Some(self.handler.delete_event(change).await)
                }
                Err(e) => {
                    warn!(error = %e, "malformed DeleteEvent payload, dropping");
                    None
                }
            },
            Some(other) => {
                // Forward compatibility: unknown kinds must not block the
                // queue.
                warn!(message_type = other, "dropping change message of unknown kind");
                None
            }
            None => {
                warn!("change message without message_type, dropping");
                None
            }
        };

        match applied {
            // Dropped without a handler call: acknowledge so the queue
            // moves on.
            None => Self::ack_or_warn(delivery).await,
            Some(Ok(())) => Self::ack_or_warn(delivery).await,
            Some(Err(e)) => {
                // Withhold the ack; the message becomes eligible for
                // redelivery. Handler failures are never surfaced to any
                // external caller.
                error!(error = %e, "change handler failed, leaving message unacked");
                drop(delivery);
            }
        }
    }

    async fn ack_or_warn(delivery: Delivery) {
        if let Err(e) = delivery.ack().await {
            warn!(error = %e, "failed to ack change message");
        }
    }
}
