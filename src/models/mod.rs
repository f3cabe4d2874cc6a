pub mod category;
pub mod cover;
pub mod entry;

pub use category::{Category, CategoryMap};
pub use cover::CoverImage;
pub use entry::{Entry, EntryId, PendingInput};
