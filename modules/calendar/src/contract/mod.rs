pub mod error;
pub mod model;

pub use error::CalendarError;
pub use model::{CalendarEvent, EventSnapshot};
