use anyhow::{anyhow, Result};
use solana_sdk::pubkey::Pubkey;
use twitter_core::config::{validate_config, ClientConfig, CommitmentLevel, ConfirmOptions};
use twitter_solana_client::{RpcTweetProgram, WalletState};

use crate::args::{Cli, Command};
use crate::io::wallet;

mod doctor;
mod env;
mod list;
mod send;

/// Everything a command needs, built once from the flags.
pub struct Context {
    pub config: ClientConfig,
    pub wallet: WalletState,
    pub program: RpcTweetProgram,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = ClientConfig {
            network: cli.network.clone(),
            program_id: cli.program_id.clone(),
            confirm: confirm_options(cli),
        };
        validate_config(&config).map_err(|e| anyhow!("invalid configuration: {}", e.message))?;

        let program = match config.program_id.as_deref() {
            Some(id) => {
                let id: Pubkey = id.parse().map_err(|_| anyhow!("invalid program id: {id}"))?;
                RpcTweetProgram::new(id)
            }
            None => RpcTweetProgram::default(),
        };

        let wallet = wallet::load(cli.keypair.as_deref(), cli.pubkey.as_deref())?;

        Ok(Self { config, wallet, program })
    }
}

/// `--commitment` drives both levels, except that a skipped preflight runs at
/// `processed` since no simulation happens.
fn confirm_options(cli: &Cli) -> ConfirmOptions {
    let preflight_commitment = if cli.skip_preflight {
        CommitmentLevel::Processed
    } else {
        cli.commitment
    };
    ConfirmOptions {
        preflight_commitment,
        commitment: cli.commitment,
        skip_preflight: cli.skip_preflight,
    }
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::Env => env::run(&ctx).await,
        Command::List => list::run(&ctx).await,
        Command::Send { topic, content } => send::run(&ctx, &topic, &content).await,
        Command::Doctor => doctor::run(&ctx).await,
    }
}

/// Resolve the configured network, reporting a failure the same way for every command.
fn resolve_env(ctx: &Context) -> Result<twitter_core::Env> {
    ctx.config.env().map_err(|e| {
        crate::output::status(crate::output::Status::Error, "failed to load env");
        if let Err(print_err) = crate::output::print(&e) {
            tracing::error!(%print_err, "failed to print error");
        }
        anyhow!(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("solana-twitter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn skip_preflight_with_stricter_commitment_is_accepted() {
        for level in ["confirmed", "finalized"] {
            let cli = parse(&["--skip-preflight", "--commitment", level, "--network", "devnet", "send"]);
            let confirm = confirm_options(&cli);
            assert!(confirm.skip_preflight);
            assert_eq!(confirm.preflight_commitment, CommitmentLevel::Processed);
            assert_eq!(confirm.commitment.as_str(), level);
            validate_config(&ClientConfig { confirm, ..ClientConfig::default() }).unwrap();
        }
    }

    #[test]
    fn commitment_drives_preflight_when_not_skipped() {
        let cli = parse(&["--commitment", "finalized", "list"]);
        let confirm = confirm_options(&cli);
        assert_eq!(confirm.preflight_commitment, CommitmentLevel::Finalized);
        assert_eq!(confirm.commitment, CommitmentLevel::Finalized);
        validate_config(&ClientConfig { confirm, ..ClientConfig::default() }).unwrap();
    }
}
