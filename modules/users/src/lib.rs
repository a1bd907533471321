//! User service: owns the `User` record. Deleting a user publishes a
//! `DeleteUser` change event so dependent services can drop the rows
//! they hold for that user.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
