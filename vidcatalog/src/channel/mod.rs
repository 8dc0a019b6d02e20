pub mod cache;
pub mod error;
pub mod source;
pub mod types;

pub use cache::{ChannelCache, StalePolicy};
pub use source::{ChannelSource, HttpSource};
pub use types::ChannelRecord;
