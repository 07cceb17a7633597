use anyhow::Result;
use serde::Serialize;
use twitter_solana_client::{Connector, RpcConnector, WalletState};

use crate::cmd::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut checks = Vec::new();

    let env = ctx.config.env();
    checks.push(Check {
        name: "network".to_string(),
        ok: env.is_ok(),
        detail: match &env {
            Ok(env) => env.connection_endpoint.clone(),
            Err(e) => format!("{} (set ACTIVE_NETWORK to devnet or localhost)", e.message),
        },
    });

    if let Ok(env) = &env {
        let detail = match RpcConnector.connect(&env.connection_endpoint, ctx.config.confirm.commitment) {
            Ok(conn) => match conn.rpc().get_version().await {
                Ok(v) => Ok(format!("solana-core {}", v.solana_core)),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(e.to_string()),
        };
        checks.push(Check {
            name: "rpc".to_string(),
            ok: detail.is_ok(),
            detail: detail.unwrap_or_else(|e| e),
        });
    }

    checks.push(wallet_check(&ctx.wallet));

    checks.push(Check {
        name: "program".to_string(),
        ok: true,
        detail: ctx.program.program_id.to_string(),
    });

    let ok = checks.iter().all(|c| c.ok);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}

/// Both `list` and `send` build a provider, so a wallet is required either way.
fn wallet_check(wallet: &WalletState) -> Check {
    Check {
        name: "wallet".to_string(),
        ok: wallet.wallet.is_some() && wallet.public_key.is_some(),
        detail: match (wallet.public_key, wallet.can_sign()) {
            (Some(pk), true) => format!("{pk} (can sign)"),
            (Some(pk), false) => format!("{pk} (watch-only, cannot send)"),
            (None, _) => "not connected, required for list and send (use --keypair or --pubkey)".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn missing_wallet_fails_the_check() {
        let check = wallet_check(&WalletState::disconnected());
        assert!(!check.ok);
        assert!(check.detail.contains("required for list and send"));
    }

    #[test]
    fn watch_only_wallet_passes_but_cannot_send() {
        let check = wallet_check(&WalletState::watch_only("watch-only", Pubkey::new_unique()));
        assert!(check.ok);
        assert!(check.detail.ends_with("(watch-only, cannot send)"));
    }
}
