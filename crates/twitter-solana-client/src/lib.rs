//! twitter-solana-client
//!
//! This crate provides a small, focused Rust client for the solana-twitter
//! on-chain program.
//!
//! It includes:
//! - program id and Anchor discriminator constants
//! - `send_tweet` instruction encoding and tweet account decoding
//! - wallet state, connections and provider acquisition
//! - a `TweetProgram` capability trait with an RPC-backed implementation
//! - the feed/submit workflow that turns every failure into a classified error
//!
//! Note: the program id is expected to be provided by the consumer. The
//! default here is the localnet deployment.

pub mod account;
pub mod constants;
pub mod instruction;
pub mod program;
pub mod provider;
pub mod workflow;

pub use account::{project, TweetAccount};
pub use constants::*;
pub use instruction::{ix_send_tweet, SendTweetAccounts, SendTweetArgs};
pub use program::{RpcTweetProgram, TweetProgram};
pub use provider::{acquire_provider, Connection, Connector, Provider, RpcConnector, WalletInfo, WalletState};
pub use workflow::Workflow;
