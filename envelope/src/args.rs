use std::path::PathBuf;

use clap::Parser;

/// Envelope API server
#[derive(Debug, Parser)]
#[command(name = "envelope", about = "Serve JSON APIs with uniform success and failure envelopes")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "envelope.toml", env = "ENVELOPE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ENVELOPE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Expose unexpected error details in responses (development only)
    #[arg(long, env = "ENVELOPE_DIAGNOSTICS")]
    pub diagnostics: bool,
}
