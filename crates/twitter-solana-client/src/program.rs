//! Program client for the tweet program.
//!
//! The workflow depends only on the [`TweetProgram`] capability so it can run
//! against a substitute in tests. [`RpcTweetProgram`] is the real one: it reads
//! accounts and submits transactions through the provider's RPC connection.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};

use crate::account::TweetAccount;
use crate::constants::{account_discriminator, TWEET_ACCOUNT_NAME};
use crate::instruction::{ix_send_tweet, SendTweetAccounts, SendTweetArgs};
use crate::provider::{commitment_config, Provider};

/// Read/write capabilities of the tweet program.
#[async_trait]
pub trait TweetProgram: Send + Sync {
    fn program_id(&self) -> Pubkey;

    /// All tweet accounts owned by the program, with their addresses.
    async fn all_tweets(&self, provider: &Provider) -> Result<Vec<(Pubkey, TweetAccount)>>;

    /// One tweet account by address.
    async fn fetch_tweet(&self, provider: &Provider, address: &Pubkey) -> Result<TweetAccount>;

    /// Build, sign and submit `send_tweet`. `signers` are required in addition
    /// to the provider wallet.
    async fn send_tweet(
        &self,
        provider: &Provider,
        args: SendTweetArgs,
        accounts: SendTweetAccounts,
        signers: &[&Keypair],
    ) -> Result<Signature>;
}

#[derive(Debug, Clone, Copy)]
pub struct RpcTweetProgram {
    pub program_id: Pubkey,
}

impl RpcTweetProgram {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }
}

impl Default for RpcTweetProgram {
    fn default() -> Self {
        Self::new(crate::constants::default_program_id())
    }
}

#[async_trait]
impl TweetProgram for RpcTweetProgram {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    async fn all_tweets(&self, provider: &Provider) -> Result<Vec<(Pubkey, TweetAccount)>> {
        let discriminator = account_discriminator(TWEET_ACCOUNT_NAME);
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(0, &discriminator))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(provider.rpc().commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = provider
            .rpc()
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        tracing::debug!(count = accounts.len(), program = %self.program_id, "fetched tweet accounts");

        accounts
            .into_iter()
            .map(|(address, account)| {
                let tweet = TweetAccount::decode(&account.data).map_err(|e| anyhow!("tweet {address}: {e}"))?;
                Ok((address, tweet))
            })
            .collect()
    }

    async fn fetch_tweet(&self, provider: &Provider, address: &Pubkey) -> Result<TweetAccount> {
        let account = provider.rpc().get_account(address).await?;
        if account.owner != self.program_id {
            return Err(anyhow!("account {address} is not owned by program {}", self.program_id));
        }
        Ok(TweetAccount::decode(&account.data)?)
    }

    async fn send_tweet(
        &self,
        provider: &Provider,
        args: SendTweetArgs,
        accounts: SendTweetAccounts,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let ix = ix_send_tweet(&self.program_id, &accounts, &args)?;
        let rpc = provider.rpc();
        let blockhash = rpc.get_latest_blockhash().await?;

        let tx = Transaction::new_with_payer(&[ix], Some(&provider.public_key()));
        let tx = sign(provider, tx, signers, blockhash)?;

        let opts = provider.opts();
        let config = RpcSendTransactionConfig {
            skip_preflight: opts.skip_preflight,
            preflight_commitment: Some(commitment_config(opts.preflight_commitment).commitment),
            ..RpcSendTransactionConfig::default()
        };
        let signature = rpc.send_transaction_with_config(&tx, config).await?;
        let commitment = commitment_config(opts.commitment);
        rpc.poll_for_signature_with_commitment(&signature, commitment).await?;
        let status = rpc.get_signature_status_with_commitment(&signature, commitment).await?;
        check_status(&signature, status)?;

        tracing::info!(%signature, tweet = %accounts.tweet, "send_tweet confirmed");
        Ok(signature)
    }
}

/// A landed signature can still carry an execution error.
fn check_status(signature: &Signature, status: Option<std::result::Result<(), TransactionError>>) -> Result<()> {
    match status {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(anyhow!("transaction {signature} failed: {e}")),
        None => Err(anyhow!("transaction {signature} has no status")),
    }
}

/// Extra signers first, then the wallet through the provider.
fn sign(provider: &Provider, mut tx: Transaction, signers: &[&Keypair], blockhash: Hash) -> Result<Transaction> {
    let extra: Vec<&dyn Signer> = signers.iter().map(|k| *k as &dyn Signer).collect();
    tx.try_partial_sign(&extra, blockhash)?;
    Ok(provider.sign_transaction(tx, blockhash)?)
}
