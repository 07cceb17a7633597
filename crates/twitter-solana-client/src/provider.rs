//! Wallet state, connections and the provider bundle.
//!
//! A [`Provider`] pairs a connection to the active endpoint with the signing
//! capability of one wallet. It is acquired per workflow call and never
//! cached.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use twitter_core::config::{CommitmentLevel, ConfirmOptions};
use twitter_core::{Env, SystemError};
use url::Url;

/// Signing capability of a wallet.
pub type WalletSigner = Arc<dyn Signer + Send + Sync>;

/// Identity of the wallet the user selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    pub name: String,
}

/// What the client currently knows about the user's wallet.
///
/// Any field may be missing: no wallet selected, selected but not connected,
/// or connected read-only without a signer.
#[derive(Clone, Default)]
pub struct WalletState {
    pub wallet: Option<WalletInfo>,
    pub public_key: Option<Pubkey>,
    pub signer: Option<WalletSigner>,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// A connected wallet backed by a local keypair.
    pub fn from_keypair(name: impl Into<String>, keypair: Keypair) -> Self {
        Self {
            wallet: Some(WalletInfo { name: name.into() }),
            public_key: Some(keypair.pubkey()),
            signer: Some(Arc::new(keypair)),
        }
    }

    /// A connected wallet that can be read but cannot sign.
    pub fn watch_only(name: impl Into<String>, public_key: Pubkey) -> Self {
        Self {
            wallet: Some(WalletInfo { name: name.into() }),
            public_key: Some(public_key),
            signer: None,
        }
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    /// Diagnostic view. Never includes key material.
    pub fn diagnostic(&self) -> Value {
        json!({
            "wallet": self.wallet.as_ref().map(|w| w.name.clone()),
            "publicKey": self.public_key.map(|k| k.to_string()),
            "canSign": self.can_sign(),
        })
    }
}

impl fmt::Debug for WalletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletState")
            .field("wallet", &self.wallet)
            .field("public_key", &self.public_key)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// A connection handle to one RPC endpoint.
pub struct Connection {
    endpoint: String,
    commitment: CommitmentLevel,
    rpc: RpcClient,
}

impl Connection {
    pub fn new(endpoint: &str, commitment: CommitmentLevel) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            commitment,
            rpc: RpcClient::new_with_commitment(endpoint.to_string(), commitment_config(commitment)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn commitment(&self) -> CommitmentLevel {
        self.commitment
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("commitment", &self.commitment)
            .finish()
    }
}

pub fn commitment_config(level: CommitmentLevel) -> CommitmentConfig {
    match level {
        CommitmentLevel::Processed => CommitmentConfig::processed(),
        CommitmentLevel::Confirmed => CommitmentConfig::confirmed(),
        CommitmentLevel::Finalized => CommitmentConfig::finalized(),
    }
}

/// Opens connections. Substituted in tests to observe whether the network
/// layer was touched.
pub trait Connector: Send + Sync {
    fn connect(&self, endpoint: &str, commitment: CommitmentLevel) -> Result<Connection>;
}

/// Connector backed by the non-blocking Solana RPC client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcConnector;

impl Connector for RpcConnector {
    fn connect(&self, endpoint: &str, commitment: CommitmentLevel) -> Result<Connection> {
        let url = Url::parse(endpoint).map_err(|e| anyhow!("invalid endpoint {endpoint:?}: {e}"))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(anyhow!("unsupported endpoint scheme: {other}")),
        }
        Ok(Connection::new(endpoint, commitment))
    }
}

/// Connection plus signing capability for one wallet.
#[derive(Debug)]
pub struct Provider {
    connection: Connection,
    wallet: WalletState,
    public_key: Pubkey,
    opts: ConfirmOptions,
}

impl Provider {
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn rpc(&self) -> &RpcClient {
        self.connection.rpc()
    }

    pub fn public_key(&self) -> Pubkey {
        self.public_key
    }

    pub fn opts(&self) -> &ConfirmOptions {
        &self.opts
    }

    /// Add the wallet's signature to a transaction.
    ///
    /// Other required signatures may already be present; they are kept.
    pub fn sign_transaction(&self, mut tx: Transaction, blockhash: Hash) -> Result<Transaction, SystemError> {
        let signer = self.signer()?;
        let signer: &dyn Signer = &**signer;
        let signers: Vec<&dyn Signer> = vec![signer];
        tx.try_partial_sign(&signers, blockhash).map_err(|e| {
            SystemError::new(
                "Failed to sign transaction",
                json!({ "err": e.to_string(), "wallet": self.wallet.diagnostic() }),
            )
        })?;
        Ok(tx)
    }

    /// Sign a batch with the wallet. Fails as a whole if any one fails.
    pub fn sign_all_transactions(&self, txs: Vec<Transaction>, blockhash: Hash) -> Result<Vec<Transaction>, SystemError> {
        txs.into_iter().map(|tx| self.sign_transaction(tx, blockhash)).collect()
    }

    pub fn diagnostic(&self) -> Value {
        json!({
            "endpoint": self.connection.endpoint(),
            "commitment": self.connection.commitment(),
            "publicKey": self.public_key.to_string(),
            "opts": self.opts,
        })
    }

    fn signer(&self) -> Result<&WalletSigner, SystemError> {
        self.wallet
            .signer
            .as_ref()
            .ok_or_else(|| SystemError::signing_unsupported(json!({ "wallet": self.wallet.diagnostic() })))
    }
}

/// Build a provider for the wallet against the environment's endpoint.
///
/// A wallet without identity or public key fails before the connector is
/// asked for anything.
pub fn acquire_provider(
    env: &Env,
    wallet: &WalletState,
    connector: &dyn Connector,
    opts: ConfirmOptions,
) -> Result<Provider, SystemError> {
    let public_key = match (&wallet.wallet, wallet.public_key) {
        (Some(_), Some(pk)) => pk,
        _ => return Err(SystemError::no_wallet(json!({ "wallet": wallet.diagnostic() }))),
    };

    let connection = connector
        .connect(&env.connection_endpoint, opts.preflight_commitment)
        .map_err(|err| {
            SystemError::provider(json!({
                "err": err.to_string(),
                "wallet": wallet.diagnostic(),
                "opts": opts,
                "connection": { "endpoint": env.connection_endpoint },
            }))
        })?;

    tracing::debug!(endpoint = %connection.endpoint(), wallet = %public_key, "provider acquired");

    Ok(Provider {
        connection,
        wallet: wallet.clone(),
        public_key,
        opts,
    })
}
