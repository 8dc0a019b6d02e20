use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Shared, read-only list of channels as handed out by the cache.
pub type ChannelList = Arc<[ChannelRecord]>;

/// A channel entry from the origin document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChannelRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ChannelRecord {
    /// The channel's genre labels: its group, when it has a non-empty one.
    pub fn genres(&self) -> Vec<String> {
        self.group
            .iter()
            .filter(|g| !g.is_empty())
            .cloned()
            .collect()
    }
}

/**
    Channel records from one successful origin fetch.

    Never mutated after construction; the cache swaps whole snapshots so
    `records` and `fetched_at` always belong to the same fetch.
*/
#[derive(Debug)]
pub struct CacheSnapshot {
    pub records: ChannelList,
    pub fetched_at: DateTime<Utc>,
}

impl CacheSnapshot {
    pub fn new(records: Vec<ChannelRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records: records.into(),
            fetched_at,
        }
    }

    /// Whether the snapshot may still be served at `now` without a refresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_optional_fields() {
        let record: ChannelRecord = serde_json::from_str(
            r#"{"id": "vf-1", "name": "Canal A", "group": null, "country": "BR"}"#,
        )
        .unwrap();
        assert_eq!(record.id, "vf-1");
        assert_eq!(record.group, None);
        assert_eq!(record.logo, None);
        assert_eq!(record.url, None);
    }

    #[test]
    fn test_genres_from_group() {
        let mut record = ChannelRecord {
            id: "vf-1".into(),
            name: "Canal A".into(),
            group: Some("ESPORTES".into()),
            logo: None,
            url: None,
        };
        assert_eq!(record.genres(), vec!["ESPORTES".to_string()]);

        record.group = Some(String::new());
        assert!(record.genres().is_empty());

        record.group = None;
        assert!(record.genres().is_empty());
    }

    #[test]
    fn test_snapshot_freshness_boundary() {
        let fetched_at = Utc::now();
        let snapshot = CacheSnapshot::new(Vec::new(), fetched_at);
        let ttl = TimeDelta::hours(4);

        assert!(snapshot.is_fresh(fetched_at, ttl));
        assert!(snapshot.is_fresh(fetched_at + ttl - TimeDelta::seconds(1), ttl));
        assert!(!snapshot.is_fresh(fetched_at + ttl, ttl));
    }
}
