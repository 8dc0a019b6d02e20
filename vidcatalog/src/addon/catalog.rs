use serde::Serialize;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::channel::ChannelRecord;

use super::{CATALOG_ID, CONTENT_TYPE, POSTER_SHAPE};

/// A channel as it appears in a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub genres: Vec<String>,
    pub poster_shape: &'static str,
}

impl From<&ChannelRecord> for MetaPreview {
    fn from(record: &ChannelRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: CONTENT_TYPE,
            poster: record.logo.clone(),
            genres: record.genres(),
            poster_shape: POSTER_SHAPE,
        }
    }
}

/// Whether `(kind, id)` names the catalog this addon publishes.
pub fn is_supported(kind: &str, id: &str) -> bool {
    kind == CONTENT_TYPE && id == CATALOG_ID
}

/**
    Project channels into a catalog listing, keeping cache order.

    With no genres (or only blank ones) every channel is listed. Otherwise a
    channel is listed when its group contains any requested genre as a
    substring, ignoring case and accents, so "musica" picks up
    "Música Clássica". Channels without a group never match a filter.
*/
pub fn browse(records: &[ChannelRecord], genres: &[String]) -> Vec<MetaPreview> {
    let wanted: Vec<String> = genres
        .iter()
        .filter(|genre| !genre.trim().is_empty())
        .map(|genre| fold(genre))
        .collect();

    records
        .iter()
        .filter(|record| wanted.is_empty() || group_matches(record, &wanted))
        .map(MetaPreview::from)
        .collect()
}

fn group_matches(record: &ChannelRecord, wanted: &[String]) -> bool {
    let Some(group) = record.group.as_deref().filter(|g| !g.is_empty()) else {
        return false;
    };
    let group = fold(group);
    wanted.iter().any(|genre| group.contains(genre.as_str()))
}

/// Uppercase with diacritics stripped, for loose genre comparison.
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}
