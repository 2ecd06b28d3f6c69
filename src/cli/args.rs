//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// TikTok collection scraper CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tiktok-collections",
    version,
    about = "Export a TikTok user's collection folders and their videos as JSON",
    long_about = "Resolves a TikTok user, lists their collection folders and fetches every video in each.\n\n\
                  TARGET may be a username, @username, profile URL, video URL, vm./vt. short link, \
                  numeric user id or secUid."
)]
pub struct Args {
    /// Username, @username, profile/video URL, short link, user id or secUid.
    pub target: String,

    /// File containing a `name=value; name2=value2` cookie line from a logged-in browser.
    #[arg(long = "cookie", env = "TIKTOK_COOKIE_FILE")]
    pub cookie_file: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Milliseconds to pause between page requests.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Attempts per item page before giving up on a collection.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Hide per-collection progress.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(path) = &self.cookie_file {
            config.account.cookie_file = Some(path.clone());
            // An explicit file on the command line beats an inline cookie in the config
            config.account.cookie = None;
        }

        if let Some(path) = &self.output {
            config.output.path = Some(path.clone());
        }

        if self.compact {
            config.output.pretty = false;
        }

        if let Some(interval) = self.interval_ms {
            config.rate.interval_ms = interval;
        }

        if let Some(retries) = self.retries {
            config.rate.retries = retries;
        }

        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }
    }
}
