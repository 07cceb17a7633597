//! twitter-core
//!
//! Core primitives for the solana-twitter client:
//! - the success/failure convention and the system/user error taxonomy
//! - the network table and environment resolver
//! - the display-oriented `Tweet` view model
//! - explicit client configuration
//!
//! This crate has no chain dependencies. Address encoding, account decoding
//! and RPC live in `twitter-solana-client`.

pub mod config;
pub mod errors;
pub mod model;
pub mod network;

pub use crate::errors::{failure, success, ErrorKind, SystemError, TweetError, UserError};
pub use crate::model::Tweet;
pub use crate::network::{resolve_environment, Env, Network};

/// Name of the configuration setting that selects the active network.
pub const ACTIVE_NETWORK_KEY: &str = "ACTIVE_NETWORK";

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{ClientConfig, CommitmentLevel, ConfirmOptions};
    pub use crate::errors::{failure, success, ErrorKind, SystemError, TweetError, UserError};
    pub use crate::model::{NewTweet, Tweet};
    pub use crate::network::{resolve_environment, Env, Network};
}
