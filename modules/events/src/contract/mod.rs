pub mod error;
pub mod model;

pub use error::EventsError;
pub use model::{Event, EventView, EventsFilter, NewEvent, EventPatch, Tag};
