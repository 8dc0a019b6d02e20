use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use super::error::OriginError;
use super::types::ChannelRecord;

const USER_AGENT: &str = concat!("vidcatalog/", env!("CARGO_PKG_VERSION"));

/**
    Anything that can produce the full channel list from the origin.

    Implementations perform a single attempt per call; retry and caching
    policy belong to the caller.
*/
pub trait ChannelSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ChannelRecord>, OriginError>> + Send;
}

/**
    Fetches the channel document with a single HTTP GET to a fixed URL.
*/
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChannelSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<ChannelRecord>, OriginError> {
        debug!(url = %self.url, "fetching channel document");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| OriginError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OriginError::Status(status));
        }

        // Raw gists serve the document as text/plain, so ignore the content type.
        let body = response
            .text()
            .await
            .map_err(|e| OriginError::Transport(e.to_string()))?;

        parse_channels(&body)
    }
}

/// Parse the origin document: a JSON array of channel objects.
pub fn parse_channels(body: &str) -> Result<Vec<ChannelRecord>, OriginError> {
    let body = body.trim_start_matches('\u{feff}');
    let records: Vec<ChannelRecord> =
        serde_json::from_str(body).map_err(|e| OriginError::Parse(e.to_string()))?;

    let total = records.len();
    let records: Vec<ChannelRecord> = records
        .into_iter()
        .filter(|record| !record.id.is_empty())
        .collect();

    if records.len() < total {
        warn!(
            dropped = total - records.len(),
            "ignoring channels without an id"
        );
    }

    Ok(records)
}

#[cfg(test)]
pub mod testing {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::{ChannelRecord, ChannelSource, OriginError};

    struct FakeState {
        response: Mutex<Result<Vec<ChannelRecord>, OriginError>>,
        calls: AtomicUsize,
    }

    /// Scripted channel source that counts how often it is fetched.
    #[derive(Clone)]
    pub struct FakeSource {
        state: Arc<FakeState>,
        delay: Option<Duration>,
    }

    impl FakeSource {
        pub fn new(response: Result<Vec<ChannelRecord>, OriginError>) -> Self {
            Self {
                state: Arc::new(FakeState {
                    response: Mutex::new(response),
                    calls: AtomicUsize::new(0),
                }),
                delay: None,
            }
        }

        pub fn ok(records: Vec<ChannelRecord>) -> Self {
            Self::new(Ok(records))
        }

        pub fn failing(error: OriginError) -> Self {
            Self::new(Err(error))
        }

        /// Make every fetch take `delay` before answering.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn set_response(&self, response: Result<Vec<ChannelRecord>, OriginError>) {
            *self.state.response.lock() = response;
        }

        pub fn calls(&self) -> usize {
            self.state.calls.load(Ordering::SeqCst)
        }
    }

    impl ChannelSource for FakeSource {
        async fn fetch(&self) -> Result<Vec<ChannelRecord>, OriginError> {
            self.state.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let response = self.state.response.lock().clone();
            response
        }
    }

    pub fn channel(
        id: &str,
        name: &str,
        group: Option<&str>,
        url: Option<&str>,
    ) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            name: name.to_string(),
            group: group.map(str::to_string),
            logo: Some(format!("http://img/{id}.png")),
            url: url.map(str::to_string),
        }
    }

    /// A small catalog covering grouped, ungrouped and unplayable channels.
    pub fn sample_channels() -> Vec<ChannelRecord> {
        vec![
            channel("vf-1", "Canal A", Some("ESPORTES"), Some("http://x/a.m3u8")),
            channel("vf-2", "Rádio Clássica", Some("Música Clássica"), None),
            channel("vf-3", "Canal Livre", None, Some("http://x/c.m3u8")),
            channel("vf-4", "Notícias 24h", Some("NOTÍCIAS"), Some("http://x/d.m3u8")),
        ]
    }
}
