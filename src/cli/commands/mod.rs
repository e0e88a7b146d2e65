//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `user`: scrobbles, neighbours, top artists, taste comparison
//! - `track`: track info and tag lookups

mod track;
mod user;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::{Error, ResultExt};
use crate::lastfm::{LastFm, Period};

pub use track::{cmd_top_tags, cmd_track_info};
pub use user::{cmd_compare, cmd_neighbours, cmd_recent, cmd_top_artists};

/// Last.fm command-line client
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Last.fm API key (or set LASTFM_API_KEY env var, or the config file)
    #[arg(short, long, env = "LASTFM_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Chart period accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Overall,
    #[value(name = "7day")]
    SevenDays,
    #[value(name = "1month")]
    OneMonth,
    #[value(name = "3month")]
    ThreeMonths,
    #[value(name = "6month")]
    SixMonths,
    #[value(name = "12month")]
    TwelveMonths,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Overall => Period::Overall,
            PeriodArg::SevenDays => Period::SevenDays,
            PeriodArg::OneMonth => Period::OneMonth,
            PeriodArg::ThreeMonths => Period::ThreeMonths,
            PeriodArg::SixMonths => Period::SixMonths,
            PeriodArg::TwelveMonths => Period::TwelveMonths,
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show a user's recently scrobbled tracks
    Recent {
        /// Last.fm user name
        user: String,
        /// Number of tracks to fetch
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
        /// Page of results
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show details for a track
    TrackInfo {
        /// Artist name
        artist: String,
        /// Track title
        track: String,
        /// Include this user's play count and loved status
        #[arg(long)]
        username: Option<String>,
        /// Let Last.fm correct misspelled names
        #[arg(long)]
        autocorrect: bool,
    },
    /// Show the top tags for an artist, or a track when --track is given
    TopTags {
        /// Artist name
        artist: String,
        /// Track title
        #[arg(long)]
        track: Option<String>,
    },
    /// Show users with similar taste
    Neighbours {
        /// Last.fm user name
        user: String,
        /// Number of neighbours to fetch
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Show a user's most played artists
    TopArtists {
        /// Last.fm user name
        user: String,
        /// Chart period
        #[arg(long, value_enum, default_value_t = PeriodArg::Overall)]
        period: PeriodArg,
        /// Number of artists to fetch
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Compare the taste of two users
    Compare {
        /// First user
        user1: String,
        /// Second user
        user2: String,
        /// Number of shared artists to list
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
    /// Print where the config file is read from
    ConfigPath,
    /// Store an API key in the config file
    SetKey {
        /// Last.fm API key
        key: String,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    if let Commands::ConfigPath = cli.command {
        match cli.config.clone().or_else(config::config_path) {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory on this platform)"),
        }
        return Ok(());
    }

    if let Commands::SetKey { key } = &cli.command {
        let path = set_api_key(config, cli.config.as_deref(), key)?;
        println!("API key saved to {}", path.display());
        return Ok(());
    }

    let client = build_client(&config, cli.api_key.as_deref())?;
    let rt = Runtime::new()?;
    let format = cli.format;

    match &cli.command {
        Commands::Recent { user, limit, page } => cmd_recent(&rt, &client, format, user, *limit, *page)?,
        Commands::TrackInfo {
            artist,
            track,
            username,
            autocorrect,
        } => cmd_track_info(
            &rt,
            &client,
            format,
            artist,
            track,
            username.as_deref(),
            *autocorrect,
        )?,
        Commands::TopTags { artist, track } => {
            cmd_top_tags(&rt, &client, format, artist, track.as_deref())?
        }
        Commands::Neighbours { user, limit } => cmd_neighbours(&rt, &client, format, user, *limit)?,
        Commands::TopArtists {
            user,
            period,
            limit,
        } => cmd_top_artists(&rt, &client, format, user, (*period).into(), *limit)?,
        Commands::Compare {
            user1,
            user2,
            limit,
        } => cmd_compare(&rt, &client, format, user1, user2, *limit)?,
        Commands::ConfigPath | Commands::SetKey { .. } => {}
    }

    Ok(())
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Build a client from config, preferring an explicit API key
pub(crate) fn build_client(config: &Config, api_key: Option<&str>) -> Result<LastFm, Error> {
    let Some(api_key) = config.resolve_api_key(api_key) else {
        eprintln!("Error: Last.fm API key required.");
        eprintln!("Get one at: https://www.last.fm/api/account/create");
        eprintln!("Then use: --api-key YOUR_KEY, set LASTFM_API_KEY, or add it to the config file");
        return Err(Error::MissingApiKey);
    };

    Ok(LastFm::from_config(api_key, &config.api)?)
}

/// Write the key into the config, keeping the other settings
pub(crate) fn set_api_key(mut config: Config, path: Option<&Path>, key: &str) -> Result<PathBuf, Error> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::MissingApiKey);
    }
    config.credentials.api_key = Some(key.to_string());

    match path {
        Some(path) => {
            config::save_to(&config, path).with_context(format!("saving {}", path.display()))?;
            Ok(path.to_path_buf())
        }
        None => {
            config::save(&config).with_context("saving config")?;
            Ok(config::config_path().ok_or(config::ConfigError::NoConfigDir)?)
        }
    }
}

/// Print a result as JSON, or as the given text rendering
pub(crate) fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recent_with_global_flags() {
        let cli = Cli::try_parse_from([
            "lastfm-client",
            "recent",
            "rj",
            "--limit",
            "3",
            "--format",
            "json",
            "--api-key",
            "KEY",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
        match cli.command {
            Commands::Recent { user, limit, page } => {
                assert_eq!(user, "rj");
                assert_eq!(limit, 3);
                assert_eq!(page, None);
            }
            _ => panic!("expected recent"),
        }
    }

    #[test]
    fn test_parse_top_artists_period() {
        let cli = Cli::try_parse_from(["lastfm-client", "top-artists", "rj", "--period", "7day"]).unwrap();
        match cli.command {
            Commands::TopArtists { period, limit, .. } => {
                assert_eq!(Period::from(period), Period::SevenDays);
                assert_eq!(limit, 10);
            }
            _ => panic!("expected top-artists"),
        }
    }

    #[test]
    fn test_set_key_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.timeout_secs = 5;
        let saved = set_api_key(config, Some(&path), "  NEWKEY ").unwrap();
        assert_eq!(saved, path);

        let loaded = config::load_from(&path);
        assert_eq!(loaded.credentials.api_key.as_deref(), Some("NEWKEY"));
        assert_eq!(loaded.api.timeout_secs, 5);
        assert!(build_client(&loaded, None).is_ok());
    }

    #[test]
    fn test_set_key_rejects_blank_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            set_api_key(Config::default(), Some(&path), "   "),
            Err(Error::MissingApiKey)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_set_key() {
        let cli = Cli::try_parse_from(["lastfm-client", "set-key", "abc123"]).unwrap();
        assert!(matches!(cli.command, Commands::SetKey { ref key } if key == "abc123"));
    }

    #[test]
    fn test_build_client_requires_key() {
        let config = Config::default();
        assert!(matches!(build_client(&config, None), Err(Error::MissingApiKey)));
        assert!(build_client(&config, Some("KEY")).is_ok());
    }
}
