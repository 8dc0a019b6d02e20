use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::addon::{catalog, find_channel};
use crate::channel::{ChannelSource, HttpSource};

use super::DEFAULT_ORIGIN_URL;

#[derive(Parser, Debug)]
pub struct ListChannelsCommand {
    /// URL of the JSON channel list
    #[arg(long, env = "ORIGIN_URL", default_value = DEFAULT_ORIGIN_URL)]
    pub origin_url: String,

    /// Timeout in seconds for fetching the channel list
    #[arg(long, env = "ORIGIN_TIMEOUT")]
    pub origin_timeout: Option<u64>,

    /// Only list channels whose group matches this genre (repeatable)
    #[arg(short, long)]
    pub genre: Vec<String>,
}

impl ListChannelsCommand {
    pub async fn run(self) -> Result<()> {
        let source = HttpSource::new(
            &self.origin_url,
            self.origin_timeout.map(Duration::from_secs),
        )?;

        println!("Fetching channels from {}", source.url());
        let records = source.fetch().await?;
        let listing = catalog::browse(&records, &self.genre);

        for meta in &listing {
            let playable = find_channel(&records, &meta.id).is_some_and(|r| r.url.is_some());
            println!(
                "  - {} {} [{}]{}",
                meta.id,
                meta.name,
                meta.genres.join(", "),
                if playable { "" } else { " (no stream)" }
            );
        }

        println!("{} of {} channels listed", listing.len(), records.len());
        Ok(())
    }
}
