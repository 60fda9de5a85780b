//! Clap derive structures for the `tvlink` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tvlink_core::{CredentialScope, MissingDevicePolicy};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tvlink -- remote control for TVs on the local network
#[derive(Debug, Parser)]
#[command(
    name = "tvlink",
    version,
    about = "Select a TV on the local network and send it remote-control keys",
    long_about = "Remembers the selected TV, its brand and its pairing credential\n\
        between runs, and forwards keypresses to a local command executor\n\
        that speaks the TV's own protocol.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "TVLINK_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command executor base URL (overrides config)
    #[arg(long, short = 'e', global = true, value_name = "URL")]
    pub executor: Option<String>,

    /// Per-command timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Session file (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Behavior of `send` with no TV selected: reject or skip
    #[arg(long, global = true, value_name = "POLICY")]
    pub missing_device: Option<MissingDevicePolicy>,

    /// Pairing credential scope: global or per-device
    #[arg(long, global = true, value_name = "SCOPE")]
    pub credential_scope: Option<CredentialScope>,

    /// Accept self-signed TLS certificates from the executor
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TVLINK_OUTPUT",
        default_value = "plain",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// Pretty-printed JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select the TV to control
    #[command(alias = "use")]
    Select(SelectArgs),

    /// Show the selected TV and pairing state
    #[command(alias = "status")]
    Show,

    /// Send one or more remote-control keys to the selected TV
    Send(SendArgs),

    /// Store a pairing credential obtained out of band
    Pair(PairArgs),

    /// Drop the stored pairing credential
    Forget,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// TV network address (IP or hostname)
    pub address: String,

    /// Brand / protocol family (e.g. samsung, lg)
    #[arg(long, short = 'b', default_value = tvlink_core::Brand::DEFAULT)]
    pub brand: String,
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Key codes, sent in order (e.g. POWER VOLUME_UP)
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PairArgs {
    /// Credential value, as issued by the TV
    #[arg(env = "TVLINK_CREDENTIAL", hide_env_values = true)]
    pub credential: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with the current resolved settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print config and session file locations
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
