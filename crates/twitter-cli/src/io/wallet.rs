use std::path::Path;

use anyhow::{anyhow, Result};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::read_keypair_file;
use twitter_solana_client::WalletState;

/// Build the wallet state from CLI flags.
///
/// No flag means no wallet is connected; the workflow reports that itself.
pub fn load(keypair: Option<&str>, pubkey: Option<&str>) -> Result<WalletState> {
    if let Some(path) = keypair {
        return from_keypair_file(path);
    }
    if let Some(pk) = pubkey {
        let key: Pubkey = pk.parse().map_err(|_| anyhow!("invalid pubkey: {pk}"))?;
        return Ok(WalletState::watch_only("watch-only", key));
    }
    Ok(WalletState::disconnected())
}

pub fn from_keypair_file<P: AsRef<Path>>(path: P) -> Result<WalletState> {
    let path = path.as_ref();
    let kp = read_keypair_file(path).map_err(|e| anyhow!("read keypair {}: {e}", path.display()))?;
    Ok(WalletState::from_keypair(format!("file:{}", path.display()), kp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{write_keypair_file, Keypair, Signer};

    #[test]
    fn keypair_file_connects_signing_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let kp = Keypair::new();
        write_keypair_file(&kp, &path).unwrap();

        let wallet = load(Some(path.to_str().unwrap()), None).unwrap();
        assert_eq!(wallet.public_key, Some(kp.pubkey()));
        assert!(wallet.can_sign());
    }

    #[test]
    fn pubkey_connects_watch_only_wallet() {
        let key = Pubkey::new_unique();
        let wallet = load(None, Some(&key.to_string())).unwrap();
        assert_eq!(wallet.public_key, Some(key));
        assert!(!wallet.can_sign());
    }

    #[test]
    fn no_flags_means_disconnected() {
        let wallet = load(None, None).unwrap();
        assert!(wallet.wallet.is_none());
        assert!(wallet.public_key.is_none());
    }

    #[test]
    fn missing_keypair_file_is_an_error() {
        assert!(load(Some("/definitely/not/here.json"), None).is_err());
    }
}
