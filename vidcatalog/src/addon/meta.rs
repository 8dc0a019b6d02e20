use serde::Serialize;

use crate::channel::ChannelRecord;

use super::{CONTENT_TYPE, POSTER_SHAPE, find_channel};

/// Full description of a single channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDetail {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub genres: Vec<String>,
    pub poster_shape: &'static str,
    pub description: String,
}

impl From<&ChannelRecord> for MetaDetail {
    fn from(record: &ChannelRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: CONTENT_TYPE,
            poster: record.logo.clone(),
            background: record.logo.clone(),
            genres: record.genres(),
            poster_shape: POSTER_SHAPE,
            description: format!("Assista ao canal {} ao vivo.", record.name),
        }
    }
}

/// Describe the channel with the given id, if it is in the catalog.
pub fn detail(records: &[ChannelRecord], id: &str) -> Option<MetaDetail> {
    find_channel(records, id).map(MetaDetail::from)
}
