pub mod repo;
pub mod service;
pub mod sync;
