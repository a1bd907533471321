//! Calendar service: per-user event calendars over a denormalized
//! replica of event records owned by the event service. The replica is
//! kept current by consuming change events from the sync queue.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
