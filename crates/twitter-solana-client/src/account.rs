//! Tweet account decoding and projection into the display model.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use thiserror::Error;
use twitter_core::Tweet;

use crate::constants::{account_discriminator, DISCRIMINATOR_LEN, TWEET_ACCOUNT_NAME};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("account data too short: {0} bytes")]
    TooShort(usize),
    #[error("account discriminator mismatch: expected {expected}, got {actual}")]
    Discriminator { expected: String, actual: String },
    #[error("invalid account body: {0}")]
    Body(#[from] std::io::Error),
}

/// On-chain tweet record, as laid out after the 8-byte discriminator.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TweetAccount {
    pub author: [u8; 32],
    pub timestamp: i64,
    pub topic: String,
    pub content: String,
}

impl TweetAccount {
    pub fn author(&self) -> Pubkey {
        Pubkey::new_from_array(self.author)
    }

    /// Decode raw account data.
    ///
    /// Accounts are allocated at their maximum size, so trailing zero padding
    /// after the body is expected and ignored.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(DecodeError::TooShort(data.len()));
        }
        let (disc, mut body) = data.split_at(DISCRIMINATOR_LEN);
        let expected = account_discriminator(TWEET_ACCOUNT_NAME);
        if disc != expected {
            return Err(DecodeError::Discriminator {
                expected: hex::encode(expected),
                actual: hex::encode(disc),
            });
        }
        Ok(Self::deserialize(&mut body)?)
    }

    /// Encode with discriminator. Used by tests and local fixtures.
    pub fn encode(&self) -> std::io::Result<Vec<u8>> {
        let mut out = account_discriminator(TWEET_ACCOUNT_NAME).to_vec();
        borsh::to_writer(&mut out, self)?;
        Ok(out)
    }
}

/// Project an on-chain record into the display model.
///
/// Addresses become base-58 text, the timestamp a decimal string.
pub fn project(address: &Pubkey, account: &TweetAccount) -> Tweet {
    Tweet {
        public_key: address.to_string(),
        author: account.author().to_string(),
        timestamp: account.timestamp.to_string(),
        content: account.content.clone(),
        topic: account.topic.clone(),
    }
}
