use std::sync::Arc;

use tracing::instrument;

use crate::broker::{connect_with_retry, Broker, BrokerError, ConnectOpts};
use crate::change::ChangeEvent;

/// Publishing half of the sync protocol, held by owning services.
#[derive(Clone)]
pub struct SyncProducer {
    broker: Arc<dyn Broker>,
}

impl SyncProducer {
    /// Connect with the bounded retry policy. Exhausting the retry
    /// budget is fatal to service startup, so the error propagates.
    pub async fn connect(
        broker: Arc<dyn Broker>,
        opts: &ConnectOpts,
    ) -> Result<Self, BrokerError> {
        connect_with_retry(broker.as_ref(), opts).await?;
        Ok(Self { broker })
    }

    /// Serialize and publish one change event. No in-process retry or
    /// buffering: durability past this point belongs to the broker.
    #[instrument(name = "syncmq.publish", skip(self, event), fields(message_type = event.message_type()))]
    pub async fn publish(&self, event: &ChangeEvent) -> Result<(), BrokerError> {
        let payload = event
            .to_bytes()
            .map_err(|e| BrokerError::Encode(e.to_string()))?;
        self.broker.publish(payload).await
    }
}
