use clap::{Parser, Subcommand};
use twitter_core::config::CommitmentLevel;

#[derive(Parser, Debug, Clone)]
#[command(name = "solana-twitter", version, about = "solana-twitter CLI")]
pub struct Cli {
    /// Emit JSON output on stdout and JSON logs on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Active network: devnet | localhost.
    #[arg(long, global = true, env = "ACTIVE_NETWORK")]
    pub network: Option<String>,

    /// Tweet program id (base-58).
    #[arg(long, global = true, env = "TWITTER_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Keypair file used as the connected wallet.
    #[arg(long, global = true, env = "TWITTER_KEYPAIR", conflicts_with = "pubkey")]
    pub keypair: Option<String>,

    /// Connect a read-only wallet by public key (cannot sign).
    #[arg(long, global = true)]
    pub pubkey: Option<String>,

    /// Preflight and confirmation commitment.
    #[arg(long, global = true, default_value = "processed", value_parser = parse_commitment)]
    pub commitment: CommitmentLevel,

    /// Skip transaction simulation before sending.
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve and print the active environment.
    Env,

    /// List every tweet stored by the program.
    List,

    /// Send a tweet and print it once confirmed.
    Send {
        #[arg(long, default_value = "veganism")]
        topic: String,
        #[arg(long, default_value = "Hummus, am I right?")]
        content: String,
    },

    /// Run environment checks.
    Doctor,
}

fn parse_commitment(s: &str) -> Result<CommitmentLevel, String> {
    s.parse().map_err(|e: twitter_core::UserError| e.message)
}
