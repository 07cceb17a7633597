use std::time::Duration;

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use twitter_core::model::NewTweet;
use twitter_core::TweetError;
use twitter_solana_client::{RpcConnector, Workflow};

use crate::cmd::list::TweetOut;
use crate::cmd::Context;
use crate::output::{self, Status};

pub async fn run(ctx: &Context, topic: &str, content: &str) -> Result<()> {
    let env = super::resolve_env(ctx)?;

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    if output::is_json() {
        pb.finish_and_clear();
    } else {
        pb.enable_steady_tick(Duration::from_millis(80));
        pb.set_message("sending tweet");
    }

    let workflow = Workflow::new(&RpcConnector, &ctx.program).with_opts(ctx.config.confirm);
    let result = workflow
        .submit_tweet_with(&env, &ctx.wallet, NewTweet::new(topic, content))
        .await;
    pb.finish_and_clear();

    match result {
        Ok(tweet) => {
            output::status(Status::Ok, "tweet sent");
            output::print(&TweetOut::from(tweet))?;
            Ok(())
        }
        Err(e) => {
            let msg = match &e {
                TweetError::User(_) => "failed to send tweet: wallet not found or transaction rejected",
                TweetError::System(_) => "failed to send tweet: system error",
            };
            output::status(Status::Error, msg);
            output::print(&e)?;
            Err(anyhow!(e))
        }
    }
}
