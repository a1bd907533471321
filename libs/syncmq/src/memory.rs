use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::broker::{AckHandle, Broker, BrokerError, Delivery, Subscription};

/// In-process implementation of the broker contract: one named queue,
/// at-least-once delivery, manual acknowledgment. Messages taken off the
/// queue sit in an in-flight set until acked; a delivery dropped without
/// ack goes back to the head of the queue.
///
/// This is the deployment used by the single-binary server and the
/// tests; a networked broker client would implement the same port.
pub struct InMemoryBroker {
    state: Arc<QueueState>,
}

struct QueueState {
    queue: Mutex<VecDeque<(u64, Vec<u8>)>>,
    in_flight: Mutex<HashMap<u64, Vec<u8>>>,
    next_tag: AtomicU64,
    connected: AtomicBool,
    closed: AtomicBool,
    notify: Notify,
    // Test hook: number of connect() calls to fail before succeeding.
    connect_failures: AtomicU32,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(QueueState {
                queue: Mutex::new(VecDeque::new()),
                in_flight: Mutex::new(HashMap::new()),
                next_tag: AtomicU64::new(1),
                connected: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                notify: Notify::new(),
                connect_failures: AtomicU32::new(0),
            }),
        }
    }

    /// Make the next `n` connect attempts fail. Used to exercise the
    /// bounded retry policy.
    pub fn fail_next_connects(&self, n: u32) {
        self.state.connect_failures.store(n, Ordering::SeqCst);
    }

    /// Shut the queue down: subscribers drain and then observe the end
    /// of the stream. Unacked in-flight messages remain eligible for
    /// redelivery until their deliveries are dropped.
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    /// Queued plus in-flight message count.
    pub fn depth(&self) -> usize {
        self.state.queue.lock().len() + self.state.in_flight.lock().len()
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broker for InMemoryBroker {
    async fn connect(&self) -> Result<(), BrokerError> {
        let remaining = self.state.connect_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.state
                .connect_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(BrokerError::Unavailable(
                "connection refused (injected)".into(),
            ));
        }
        self.state.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn publish(&self, payload: Vec<u8>) -> Result<(), BrokerError> {
        if self.state.closed.load(Ordering::SeqCst) {
            return Err(BrokerError::Closed);
        }
        if !self.state.connected.load(Ordering::SeqCst) {
            return Err(BrokerError::Unavailable("not connected".into()));
        }
        let tag = self.state.next_tag.fetch_add(1, Ordering::SeqCst);
        self.state.queue.lock().push_back((tag, payload));
        self.state.notify.notify_one();
        Ok(())
    }

    async fn subscribe(&self) -> Result<Box<dyn Subscription>, BrokerError> {
        if !self.state.connected.load(Ordering::SeqCst) {
            return Err(BrokerError::Unavailable("not connected".into()));
        }
        Ok(Box::new(MemSubscription {
            state: self.state.clone(),
        }))
    }
}

struct MemSubscription {
    state: Arc<QueueState>,
}

#[async_trait]
impl Subscription for MemSubscription {
    async fn recv(&mut self) -> Option<Delivery> {
        loop {
            if let Some((tag, payload)) = self.state.queue.lock().pop_front() {
                self.state.in_flight.lock().insert(tag, payload.clone());
                return Some(Delivery::new(
                    payload,
                    Box::new(MemAck {
                        state: self.state.clone(),
                        tag,
                    }),
                ));
            }
            if self.state.closed.load(Ordering::SeqCst) {
                return None;
            }
            self.state.notify.notified().await;
        }
    }
}

struct MemAck {
    state: Arc<QueueState>,
    tag: u64,
}

#[async_trait]
impl AckHandle for MemAck {
    async fn ack(self: Box<Self>) -> Result<(), BrokerError> {
        self.state.in_flight.lock().remove(&self.tag);
        Ok(())
    }
}

impl Drop for MemAck {
    fn drop(&mut self) {
        // Still in flight means the delivery was never acked: requeue at
        // the head so redelivery happens before newer messages.
        if let Some(payload) = self.state.in_flight.lock().remove(&self.tag) {
            self.state.queue.lock().push_front((self.tag, payload));
            self.state.notify.notify_one();
        }
    }
}
