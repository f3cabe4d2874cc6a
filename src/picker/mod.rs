pub mod session;
pub mod source;

pub use session::{ActiveSession, ImageAcquisition, PickError};
pub use source::{ChannelImageSource, ImageSource, PickOutcome, PickRequest};
