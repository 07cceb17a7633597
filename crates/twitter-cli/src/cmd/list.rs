use anyhow::{anyhow, Result};
use serde::Serialize;
use twitter_core::Tweet;
use twitter_solana_client::{RpcConnector, Workflow};

use crate::cmd::Context;
use crate::output::{self, Status};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetOut {
    #[serde(flatten)]
    pub tweet: Tweet,
    pub created_at: Option<String>,
}

impl From<Tweet> for TweetOut {
    fn from(tweet: Tweet) -> Self {
        let created_at = tweet.created_at();
        Self { tweet, created_at }
    }
}

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub tweets: Vec<TweetOut>,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let env = super::resolve_env(ctx)?;

    let workflow = Workflow::new(&RpcConnector, &ctx.program).with_opts(ctx.config.confirm);
    let tweets = match workflow.list_tweets(&env, &ctx.wallet).await {
        Ok(t) => t,
        Err(e) => {
            output::status(Status::Error, "failed to fetch tweets");
            output::print(&e)?;
            return Err(anyhow!(e));
        }
    };

    if tweets.is_empty() {
        output::status(Status::Warn, "no tweets yet");
    } else {
        output::status(Status::Ok, "tweets fetched");
    }

    output::print(&ListOut {
        tweets: tweets.into_iter().map(TweetOut::from).collect(),
    })?;
    Ok(())
}
