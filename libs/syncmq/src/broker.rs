use std::time::Duration;

use async_trait::async_trait;

/// Broker-facing failures. Connection exhaustion maps to `Unavailable`
/// and is fatal to service startup.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("broker unavailable: {0}")]
    Unavailable(String),
    #[error("broker connection is closed")]
    Closed,
    #[error("failed to encode change event: {0}")]
    Encode(String),
}

/// Acknowledgment half of a delivery. Implementations requeue the
/// message when the handle is dropped without `ack`.
#[async_trait]
pub trait AckHandle: Send {
    async fn ack(self: Box<Self>) -> Result<(), BrokerError>;
}

/// One message taken off the queue. The message stays in-flight until
/// `ack` is called; dropping an unacked delivery makes it eligible for
/// redelivery.
pub struct Delivery {
    pub payload: Vec<u8>,
    ack: Box<dyn AckHandle>,
}

impl Delivery {
    pub fn new(payload: Vec<u8>, ack: Box<dyn AckHandle>) -> Self {
        Self { payload, ack }
    }

    /// Acknowledge durable application. Call only after the local
    /// mutation has committed.
    pub async fn ack(self) -> Result<(), BrokerError> {
        self.ack.ack().await
    }
}

/// Durable queue collaborator: single named queue, at-least-once
/// delivery, manual per-message acknowledgment.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Establish (or re-establish) the connection. May be called more
    /// than once; use [`connect_with_retry`] at startup.
    async fn connect(&self) -> Result<(), BrokerError>;

    /// Publish one message. Assumes a live connection; there is no
    /// in-process retry or buffering here, durability is the broker's.
    async fn publish(&self, payload: Vec<u8>) -> Result<(), BrokerError>;

    /// Open a subscription on the queue.
    async fn subscribe(&self) -> Result<Box<dyn Subscription>, BrokerError>;
}

#[async_trait]
pub trait Subscription: Send {
    /// Next delivery, or `None` once the broker shuts down.
    async fn recv(&mut self) -> Option<Delivery>;
}

/// Bounded fixed-backoff connect policy.
#[derive(Debug, Clone)]
pub struct ConnectOpts {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Retry `connect` up to `opts.attempts` times with a fixed delay in
/// between. The final error is returned to the caller, which is expected
/// to treat it as fatal to startup.
pub async fn connect_with_retry(
    broker: &dyn Broker,
    opts: &ConnectOpts,
) -> Result<(), BrokerError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match broker.connect().await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < opts.attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = opts.attempts,
                    error = %e,
                    "broker connection attempt failed, retrying"
                );
                tokio::time::sleep(opts.delay).await;
            }
            Err(e) => {
                tracing::error!(attempts = opts.attempts, "all broker connection attempts failed");
                return Err(e);
            }
        }
    }
}
