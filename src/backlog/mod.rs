pub mod controller;
pub mod events;
pub mod store;

pub use controller::{BacklogController, PickTicket};
pub use events::{BacklogEvent, BacklogSnapshot, CategorySnapshot, EntryView};
pub use store::{EntryError, EntryStore};
