use clap::Parser;
use log::info;
use rliker::clients::{SpotifyClient, errors::Result};
use rliker::config::Config;
use rliker::liker;

#[derive(Parser)]
#[command(name = "rliker")]
#[command(version, about = "Like every track of a Spotify playlist", long_about = None)]
struct Cli {}

pub async fn run() -> Result<()> {
    let _cli = Cli::parse();

    info!("Building config ...");
    let config = Config::from_env()?;
    let spotify = SpotifyClient::try_default(&config)?;
    info!("Authorizing client ...");
    // CLI prompt may be shown here
    spotify.authorize_client().await?;

    let stdin = std::io::stdin();
    let summary = liker::like_playlist(&spotify, config, stdin.lock(), std::io::stdout()).await?;
    info!(
        "Checked {} tracks, liked {} new ones",
        summary.checked, summary.added
    );
    Ok(())
}
