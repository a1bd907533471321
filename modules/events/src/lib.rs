//! Event service: owns the `Event` record and the multi-strategy,
//! cursor-paginated query engine over it. Mutations that other services
//! replicate (edits, deletes) are published as change events on the
//! sync queue.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
