use anyhow::Result;
use clap::{Parser, Subcommand};

mod list_channels;
mod serve;

pub use list_channels::ListChannelsCommand;
pub use serve::ServeCommand;

/// Channel list published by default.
pub const DEFAULT_ORIGIN_URL: &str = "https://gist.githubusercontent.com/pedra90z/0dcf405f58abe4b327ddff457f40bc35/raw/d0f4721acb0def74da1381ada390752c65b697f8/gistfile1.txt";

#[derive(Parser, Debug)]
#[command(name = "vidcatalog")]
#[command(about = "TV channel catalog addon backed by a cached remote channel list")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeCommand,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the addon HTTP server (default)
    Serve(ServeCommand),
    /// Fetch the channel list once, print it and exit
    ListChannels(ListChannelsCommand),
}

impl Args {
    pub async fn run(self) -> Result<()> {
        let command = self.command.unwrap_or(Command::Serve(self.serve));

        match command {
            Command::Serve(cmd) => cmd.run().await,
            Command::ListChannels(cmd) => cmd.run().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let args =
            Args::try_parse_from(["vidcatalog", "--port", "7000", "--cache-ttl", "600"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.serve.port, 7000);
        assert_eq!(args.serve.cache_ttl, 600);
    }

    #[test]
    fn test_serve_subcommand() {
        let args = Args::try_parse_from([
            "vidcatalog",
            "serve",
            "--origin-url",
            "http://localhost/channels.json",
            "--serve-stale",
        ])
        .unwrap();
        match args.command {
            Some(Command::Serve(cmd)) => {
                assert_eq!(cmd.origin_url, "http://localhost/channels.json");
                assert!(cmd.serve_stale);
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_list_channels_genres() {
        let args =
            Args::try_parse_from(["vidcatalog", "list-channels", "-g", "esportes", "-g", "música"])
                .unwrap();
        match args.command {
            Some(Command::ListChannels(cmd)) => {
                assert_eq!(cmd.genre, vec!["esportes", "música"]);
            }
            other => panic!("expected list-channels command, got {other:?}"),
        }
    }
}
