//! CLI definitions for the `kantoku-probe` binary.
//!
//! Running with no arguments probes the local development webhook with the
//! built-in test user. Every default can be overridden by a flag or an
//! environment variable; there is no configuration file.

pub mod probe;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use kantoku_types::config::{
    DEFAULT_DAILY_GOAL_MINUTES, DEFAULT_TEST_USER_ID, DEFAULT_TIMEOUT_SECS, DEFAULT_WEBHOOK_URL,
    ProbeConfig,
};

/// Smoke-test the n8n "Generate Tasks" workflow webhook.
#[derive(Parser)]
#[command(name = "kantoku-probe", version, about, long_about = None)]
pub struct Cli {
    /// Webhook URL to POST the task generation payload to.
    #[arg(long, env = "N8N_WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub url: String,

    /// User id embedded verbatim in the payload.
    #[arg(long, env = "KANTOKU_TEST_USER_ID", default_value = DEFAULT_TEST_USER_ID)]
    pub user_id: String,

    /// Daily study goal sent as `daily_goal_minutes`.
    #[arg(long, env = "KANTOKU_DAILY_GOAL_MINUTES", default_value_t = DEFAULT_DAILY_GOAL_MINUTES)]
    pub daily_goal_minutes: u32,

    /// Give up on the request after this many seconds.
    #[arg(
        long,
        env = "KANTOKU_PROBE_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Print the probe report as JSON instead of styled text.
    #[arg(long)]
    pub json: bool,

    /// Only log errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logging on stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Settings for the probe run.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            webhook_url: self.url.clone(),
            user_id: self.user_id.clone(),
            daily_goal_minutes: self.daily_goal_minutes,
            timeout_secs: self.timeout_secs,
        }
    }
}
