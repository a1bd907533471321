//! Asynchronous cross-service synchronization over a durable queue.
//!
//! Owning services publish [`ChangeEvent`]s when they mutate records that
//! other services keep denormalized copies of. Dependent services run a
//! [`SyncConsumer`] that dispatches each message to a [`ChangeHandler`]
//! and acknowledges only after the local mutation committed. The broker
//! guarantees at-least-once delivery, so handlers must be idempotent.

mod broker;
mod change;
mod consumer;
mod memory;
mod producer;

pub use broker::{connect_with_retry, Broker, BrokerError, ConnectOpts, Delivery, Subscription};
pub use change::{ChangeEvent, DeleteEvent, DeleteUser, EditEvent};
pub use consumer::{ChangeHandler, SyncConsumer};
pub use memory::InMemoryBroker;
pub use producer::SyncProducer;
