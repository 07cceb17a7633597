//! Display models.
//!
//! `Tweet` is a projection of an on-chain tweet account into plain strings.
//! It is never constructed on its own; the chain client derives it from a
//! decoded record. `NewTweet` is the user input for a submission.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::UserError;

/// Maximum topic length accepted by the on-chain program, in characters.
pub const MAX_TOPIC_CHARS: usize = 50;

/// Maximum content length accepted by the on-chain program, in characters.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Display-ready tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Base-58 address of the tweet account.
    pub public_key: String,
    /// Base-58 address of the author wallet.
    pub author: String,
    /// Unix timestamp in seconds, decimal.
    pub timestamp: String,
    pub content: String,
    pub topic: String,
}

impl Tweet {
    /// Creation time as RFC 3339, if the timestamp is a valid unix time.
    #[cfg(feature = "time")]
    pub fn created_at(&self) -> Option<String> {
        use time::format_description::well_known::Rfc3339;

        let secs: i64 = self.timestamp.parse().ok()?;
        let at = time::OffsetDateTime::from_unix_timestamp(secs).ok()?;
        at.format(&Rfc3339).ok()
    }
}

/// Arguments for a new tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTweet {
    pub topic: String,
    pub content: String,
}

impl Default for NewTweet {
    fn default() -> Self {
        Self {
            topic: "veganism".to_string(),
            content: "Hummus, am I right?".to_string(),
        }
    }
}

impl NewTweet {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
        }
    }

    /// Check the same limits the program enforces, before paying for a round trip.
    pub fn validate(&self) -> Result<(), UserError> {
        let topic_chars = self.topic.chars().count();
        let content_chars = self.content.chars().count();

        let reason = if topic_chars > MAX_TOPIC_CHARS {
            Some(format!("topic must be at most {MAX_TOPIC_CHARS} characters"))
        } else if content_chars == 0 {
            Some("content must not be empty".to_string())
        } else if content_chars > MAX_CONTENT_CHARS {
            Some(format!("content must be at most {MAX_CONTENT_CHARS} characters"))
        } else {
            None
        };

        match reason {
            None => Ok(()),
            Some(reason) => Err(UserError::invalid_tweet(json!({
                "reason": reason,
                "topicChars": topic_chars,
                "contentChars": content_chars,
            }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_new_tweet_is_valid() {
        NewTweet::default().validate().unwrap();
    }

    #[test]
    fn limits_are_counted_in_chars() {
        let topic = "é".repeat(MAX_TOPIC_CHARS);
        NewTweet::new(topic, "ok").validate().unwrap();

        let e = NewTweet::new("t".repeat(MAX_TOPIC_CHARS + 1), "ok")
            .validate()
            .unwrap_err();
        assert!(e.data["reason"].as_str().unwrap().contains("topic"));

        let e = NewTweet::new("t", "").validate().unwrap_err();
        assert!(e.data["reason"].as_str().unwrap().contains("empty"));

        let e = NewTweet::new("t", "c".repeat(MAX_CONTENT_CHARS + 1))
            .validate()
            .unwrap_err();
        assert_eq!(e.data["contentChars"], MAX_CONTENT_CHARS + 1);
    }

    #[test]
    fn tweet_serializes_camel_case() {
        let t = Tweet {
            public_key: "k".into(),
            author: "a".into(),
            timestamp: "1700000000".into(),
            content: "c".into(),
            topic: "t".into(),
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["publicKey"], "k");
        assert_eq!(v["timestamp"], "1700000000");
    }

    #[cfg(feature = "time")]
    #[test]
    fn created_at_formats_unix_seconds() {
        let t = Tweet {
            public_key: String::new(),
            author: String::new(),
            timestamp: "1700000000".into(),
            content: String::new(),
            topic: String::new(),
        };
        assert_eq!(t.created_at().as_deref(), Some("2023-11-14T22:13:20Z"));

        let bad = Tweet { timestamp: "soon".into(), ..t };
        assert_eq!(bad.created_at(), None);
    }
}
