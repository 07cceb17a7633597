//! Success/failure convention and error taxonomy.
//!
//! Every public operation in the client returns a `Result`. Library failures
//! are caught at the nearest boundary and converted into one of two kinds:
//!
//! - [`SystemError`]: the environment or infrastructure failed (unknown
//!   network, provider could not be built, RPC read failed).
//! - [`UserError`]: the failure is attributable to the user's state or
//!   action (no connected wallet, rejected or failed transaction).
//!
//! Both carry a structured `data` payload so callers can inspect the root
//! cause instead of parsing a message string.

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Wrap a value as a successful outcome.
pub const fn success<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Wrap a value as a failed outcome.
pub const fn failure<T, E>(value: E) -> Result<T, E> {
    Err(value)
}

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    System,
    User,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// Infrastructure-level failure.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("system error: {message}")]
pub struct SystemError {
    pub message: String,
    pub data: Value,
}

impl SystemError {
    pub fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::System
    }

    pub fn unknown_network(data: Value) -> Self {
        Self::new("Unknown network", data)
    }

    pub fn no_wallet(data: Value) -> Self {
        Self::new("No wallet", data)
    }

    pub fn provider(data: Value) -> Self {
        Self::new("Failed to get provider", data)
    }

    pub fn signing_unsupported(data: Value) -> Self {
        Self::new("Wallet does not support signing", data)
    }
}

/// Failure attributable to the user's state or action.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("user error: {message}")]
pub struct UserError {
    pub message: String,
    pub data: Value,
}

impl UserError {
    pub fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::User
    }

    pub fn no_wallet(data: Value) -> Self {
        Self::new("No wallet", data)
    }

    pub fn invalid_tweet(data: Value) -> Self {
        Self::new("Invalid tweet", data)
    }

    pub fn send_failed(data: Value) -> Self {
        Self::new("Failed to send tweet", data)
    }
}

/// Either kind of failure. Returned by operations that can fail both ways.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(untagged)]
pub enum TweetError {
    #[error(transparent)]
    System(SystemError),
    #[error(transparent)]
    User(UserError),
}

impl TweetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::System(_) => ErrorKind::System,
            Self::User(_) => ErrorKind::User,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::System(e) => &e.message,
            Self::User(e) => &e.message,
        }
    }

    pub fn data(&self) -> &Value {
        match self {
            Self::System(e) => &e.data,
            Self::User(e) => &e.data,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<SystemError> for TweetError {
    fn from(e: SystemError) -> Self {
        Self::System(e)
    }
}

impl From<UserError> for TweetError {
    fn from(e: UserError) -> Self {
        Self::User(e)
    }
}

#[derive(Serialize)]
struct ErrorRepr<'a> {
    #[serde(rename = "type")]
    kind: ErrorKind,
    message: &'a str,
    data: &'a Value,
}

impl Serialize for SystemError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorRepr {
            kind: ErrorKind::System,
            message: &self.message,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

impl Serialize for UserError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorRepr {
            kind: ErrorKind::User,
            message: &self.message,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn success_is_ok_and_keeps_value(v in any::<i64>()) {
            let r: Result<i64, SystemError> = success(v);
            prop_assert!(r.is_ok());
            prop_assert!(!r.is_err());
            prop_assert_eq!(r.ok(), Some(v));
        }

        #[test]
        fn failure_is_err_and_keeps_value(msg in ".*") {
            let e = UserError::new(msg.clone(), Value::Null);
            let r: Result<(), UserError> = failure(e.clone());
            prop_assert!(r.is_err());
            prop_assert!(!r.is_ok());
            prop_assert_eq!(r.unwrap_err(), e);
        }
    }

    #[test]
    fn errors_serialize_with_type_tag() {
        let e = SystemError::no_wallet(json!({ "wallet": null }));
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "system");
        assert_eq!(v["message"], "No wallet");
        assert_eq!(v["data"]["wallet"], Value::Null);

        let e: TweetError = UserError::send_failed(json!({})).into();
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "user");
    }

    #[test]
    fn tweet_error_keeps_kind() {
        let e: TweetError = SystemError::provider(json!({ "err": "boom" })).into();
        assert_eq!(e.kind(), ErrorKind::System);
        assert_eq!(e.data()["err"], "boom");
        assert_matches!(e, TweetError::System(SystemError { ref message, .. }) if message == "Failed to get provider");
    }
}
