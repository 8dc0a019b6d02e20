use serde::Serialize;

use crate::channel::ChannelRecord;

use super::find_channel;

/// Label shown on the play button for a channel's stream.
pub const STREAM_TITLE: &str = "Assistir";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamOption {
    pub title: String,
    pub url: String,
}

/// Playable streams for a channel: one when it has a URL, none otherwise.
pub fn streams(records: &[ChannelRecord], id: &str) -> Vec<StreamOption> {
    find_channel(records, id)
        .and_then(|record| record.url.as_ref())
        .map(|url| StreamOption {
            title: STREAM_TITLE.to_string(),
            url: url.clone(),
        })
        .into_iter()
        .collect()
}
