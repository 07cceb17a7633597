//! Feed and submit workflows.
//!
//! Each call runs strictly in order: acquire provider, then talk to the
//! program. Nothing is retried and nothing is cached between calls. Every
//! failure leaves as a classified error; nothing here returns `anyhow`.

use serde_json::{json, Value};
use solana_sdk::signature::{Keypair, Signer};
use twitter_core::config::ConfirmOptions;
use twitter_core::model::NewTweet;
use twitter_core::{Env, SystemError, Tweet, TweetError, UserError};

use crate::account::project;
use crate::instruction::{SendTweetAccounts, SendTweetArgs};
use crate::program::TweetProgram;
use crate::provider::{acquire_provider, Connector, Provider, WalletState};

/// Collaborators shared by the workflow calls.
pub struct Workflow<'a> {
    pub connector: &'a dyn Connector,
    pub program: &'a dyn TweetProgram,
    pub opts: ConfirmOptions,
}

impl<'a> Workflow<'a> {
    pub fn new(connector: &'a dyn Connector, program: &'a dyn TweetProgram) -> Self {
        Self {
            connector,
            program,
            opts: ConfirmOptions::default(),
        }
    }

    pub fn with_opts(mut self, opts: ConfirmOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Read every tweet the program owns.
    pub async fn list_tweets(&self, env: &Env, wallet: &WalletState) -> Result<Vec<Tweet>, SystemError> {
        let provider = acquire_provider(env, wallet, self.connector, self.opts).inspect_err(log_system)?;

        let records = self.program.all_tweets(&provider).await.map_err(|err| {
            let e = SystemError::new(
                "Failed to fetch tweets",
                json!({
                    "err": format!("{err:#}"),
                    "env": env,
                    "provider": provider.diagnostic(),
                    "program": self.program_diagnostic(),
                }),
            );
            log_system(&e);
            e
        })?;

        let tweets: Vec<Tweet> = records.iter().map(|(address, account)| project(address, account)).collect();
        tracing::info!(count = tweets.len(), "tweets fetched");
        Ok(tweets)
    }

    /// Submit the default tweet.
    pub async fn submit_tweet(&self, env: &Env, wallet: &WalletState) -> Result<Tweet, TweetError> {
        self.submit_tweet_with(env, wallet, NewTweet::default()).await
    }

    /// Submit a tweet and read it back.
    ///
    /// A wallet without a public key is reported as a user error before any
    /// provider is built. Failures while sending or fetching are user errors
    /// carrying the full call context, except a wallet that cannot sign, which
    /// stays a system error.
    pub async fn submit_tweet_with(&self, env: &Env, wallet: &WalletState, new_tweet: NewTweet) -> Result<Tweet, TweetError> {
        let Some(author) = wallet.public_key else {
            let e = UserError::no_wallet(json!({ "wallet.publicKey": Value::Null }));
            log_user(&e);
            return Err(e.into());
        };

        let provider = acquire_provider(env, wallet, self.connector, self.opts).inspect_err(log_system)?;

        new_tweet.validate().inspect_err(log_user)?;

        let tweet = Keypair::new();
        let accounts = SendTweetAccounts::new(author, tweet.pubkey());

        match self.send_and_fetch(&provider, new_tweet.into(), accounts, &tweet).await {
            Ok(t) => {
                tracing::info!(tweet = %t.public_key, "tweet sent");
                Ok(t)
            }
            Err(err) => {
                if let Some(sys) = err.downcast_ref::<SystemError>() {
                    log_system(sys);
                    return Err(sys.clone().into());
                }
                let e = UserError::send_failed(json!({
                    "err": format!("{err:#}"),
                    "env": env,
                    "wallet": wallet.diagnostic(),
                    "provider": provider.diagnostic(),
                    "program": self.program_diagnostic(),
                    "tweet": tweet.pubkey().to_string(),
                }));
                log_user(&e);
                Err(e.into())
            }
        }
    }

    async fn send_and_fetch(
        &self,
        provider: &Provider,
        args: SendTweetArgs,
        accounts: SendTweetAccounts,
        tweet: &Keypair,
    ) -> anyhow::Result<Tweet> {
        self.program.send_tweet(provider, args, accounts, &[tweet]).await?;
        let account = self.program.fetch_tweet(provider, &accounts.tweet).await?;
        Ok(project(&accounts.tweet, &account))
    }

    fn program_diagnostic(&self) -> Value {
        json!({ "programId": self.program.program_id().to_string() })
    }
}

fn log_system(e: &SystemError) {
    tracing::warn!(kind = e.kind().as_str(), message = %e.message, data = %e.data, "workflow failed");
}

fn log_user(e: &UserError) {
    tracing::warn!(kind = e.kind().as_str(), message = %e.message, data = %e.data, "workflow failed");
}
