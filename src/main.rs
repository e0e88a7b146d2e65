//! lastfm-client - query the Last.fm web service from the command line.

use clap::Parser;
use lastfm_client::cli;
use lastfm_client::error::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so JSON output on stdout stays clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("lastfm_client=info".parse()?))
        .init();

    let result = cli::run_command(&args);
    if let Err(err) = &result
        && err.downcast_ref::<Error>().is_some_and(Error::is_upstream)
    {
        tracing::warn!("Last.fm rejected the request, check the names and your API key");
    }
    result
}
