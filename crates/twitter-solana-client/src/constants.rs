//! Constants shared between the on-chain program and clients.
//!
//! Discriminators follow the Anchor convention: the first 8 bytes of
//! `sha256("<namespace>:<name>")`. Keep the names stable, they are part of
//! the program's wire format.

use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

/// Default program id (localnet deployment).
///
/// Override with `--program-id` / `TWITTER_PROGRAM_ID` for other deployments.
pub const DEFAULT_PROGRAM_ID: &str = "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS";

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

/// Anchor account name of tweet records.
pub const TWEET_ACCOUNT_NAME: &str = "Tweet";

/// Anchor instruction name for creating a tweet.
pub const SEND_TWEET_IX_NAME: &str = "send_tweet";

pub const DISCRIMINATOR_LEN: usize = 8;

/// Allocated size of a tweet account: discriminator, author, timestamp,
/// then the two length-prefixed strings at their maximum (4 bytes per char).
pub const TWEET_ACCOUNT_SPACE: usize = DISCRIMINATOR_LEN
    + 32
    + 8
    + 4
    + twitter_core::model::MAX_TOPIC_CHARS * 4
    + 4
    + twitter_core::model::MAX_CONTENT_CHARS * 4;

/// Anchor discriminator for an account type.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", name)
}

/// Anchor discriminator for a global instruction.
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}
