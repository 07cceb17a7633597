//! Instruction encoding for the tweet program.
//!
//! Data layout is the Anchor one: an 8-byte instruction discriminator followed
//! by the borsh-encoded argument struct.

use anyhow::{anyhow, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::constants::{instruction_discriminator, DISCRIMINATOR_LEN, SEND_TWEET_IX_NAME};

/// Arguments of `send_tweet`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, BorshSerialize, BorshDeserialize)]
pub struct SendTweetArgs {
    pub topic: String,
    pub content: String,
}

impl From<twitter_core::model::NewTweet> for SendTweetArgs {
    fn from(t: twitter_core::model::NewTweet) -> Self {
        Self {
            topic: t.topic,
            content: t.content,
        }
    }
}

/// Accounts of `send_tweet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTweetAccounts {
    pub author: Pubkey,
    pub tweet: Pubkey,
    pub system_program: Pubkey,
}

impl SendTweetAccounts {
    pub fn new(author: Pubkey, tweet: Pubkey) -> Self {
        Self {
            author,
            tweet,
            system_program: solana_program::system_program::id(),
        }
    }
}

impl SendTweetArgs {
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = instruction_discriminator(SEND_TWEET_IX_NAME).to_vec();
        BorshSerialize::serialize(self, &mut out).map_err(|e| anyhow!("serialize: {e}"))?;
        Ok(out)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(anyhow!("instruction data too short"));
        }
        let (disc, body) = data.split_at(DISCRIMINATOR_LEN);
        if disc != instruction_discriminator(SEND_TWEET_IX_NAME) {
            return Err(anyhow!("not a send_tweet instruction"));
        }
        Self::try_from_slice(body).map_err(|e| anyhow!("deserialize: {e}"))
    }
}

/// Build the `send_tweet` instruction.
///
/// The tweet account is created by the program and must sign; the author pays.
pub fn ix_send_tweet(program_id: &Pubkey, accounts: &SendTweetAccounts, args: &SendTweetArgs) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(accounts.tweet, true),
            AccountMeta::new(accounts.author, true),
            AccountMeta::new_readonly(accounts.system_program, false),
        ],
        data: args.to_vec()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_tweet_data_layout() {
        let args = SendTweetArgs {
            topic: "rust".into(),
            content: "hi".into(),
        };
        let data = args.to_vec().unwrap();
        assert_eq!(&data[..8], &instruction_discriminator("send_tweet"));
        // u32 LE length prefix then bytes, per field.
        assert_eq!(&data[8..12], &4u32.to_le_bytes());
        assert_eq!(&data[12..16], b"rust");
        assert_eq!(&data[16..20], &2u32.to_le_bytes());
        assert_eq!(&data[20..], b"hi");
        assert_eq!(SendTweetArgs::from_slice(&data).unwrap(), args);
    }

    #[test]
    fn send_tweet_accounts_order_and_flags() {
        let program = Pubkey::new_unique();
        let accounts = SendTweetAccounts::new(Pubkey::new_unique(), Pubkey::new_unique());
        let ix = ix_send_tweet(&program, &accounts, &SendTweetArgs { topic: String::new(), content: "x".into() }).unwrap();

        assert_eq!(ix.program_id, program);
        assert_eq!(ix.accounts[0].pubkey, accounts.tweet);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, accounts.author);
        assert!(ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, solana_program::system_program::id());
        assert!(!ix.accounts[2].is_signer && !ix.accounts[2].is_writable);
    }

    #[test]
    fn rejects_foreign_instruction_data() {
        assert!(SendTweetArgs::from_slice(&[0u8; 16]).is_err());
    }
}
