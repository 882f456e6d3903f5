use std::path::PathBuf;

use clap::Parser;

/// Linguavoice backend
#[derive(Debug, Parser)]
#[command(
    name = "linguavoice",
    about = "Translation and speech-synthesis backend with magic-link login relay"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "linguavoice.toml", env = "LINGUAVOICE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LINGUAVOICE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive (e.g. "info" or "linguavoice_server=debug")
    #[arg(long, default_value = "info", env = "LINGUAVOICE_LOG")]
    pub log_filter: String,
}
