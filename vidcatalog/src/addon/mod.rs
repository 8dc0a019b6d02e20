pub mod catalog;
pub mod manifest;
pub mod meta;
pub mod stream;

pub use manifest::AddonManifest;

use crate::channel::ChannelRecord;

/// The only content type this addon serves.
pub const CONTENT_TYPE: &str = "tv";

/// The only catalog this addon publishes.
pub const CATALOG_ID: &str = "vivo-fibra-tv";

/// Channels are always shown as wide tiles.
pub const POSTER_SHAPE: &str = "landscape";

/// Find a channel by exact id. The first match wins.
pub fn find_channel<'a>(records: &'a [ChannelRecord], id: &str) -> Option<&'a ChannelRecord> {
    records.iter().find(|record| record.id == id)
}
