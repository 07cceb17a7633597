//! Network environments.
//!
//! Exactly two network names are recognized. The setting that selects one is
//! injected by the caller; this module never reads the process environment.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use crate::errors::{failure, success, SystemError};
use crate::ACTIVE_NETWORK_KEY;

/// Recognized network names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Localhost,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Devnet, Network::Localhost];

    /// Return the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Localhost => "localhost",
        }
    }

    /// The environment this network resolves to.
    pub fn env(&self) -> Env {
        // NOTE: the endpoints look swapped relative to the names (devnet points
        // at a local validator, localhost at the public devnet cluster). This is
        // the deployed table; do not reorder without checking with the frontend.
        let endpoint = match self {
            Self::Devnet => "http://localhost:8899",
            Self::Localhost => "https://api.devnet.solana.com",
        };
        Env {
            connection_endpoint: endpoint.to_string(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = SystemError;

    /// Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Self::Devnet),
            "localhost" => Ok(Self::Localhost),
            _ => Err(unknown_network(Some(s))),
        }
    }
}

/// The configuration the workflow depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Env {
    pub connection_endpoint: String,
}

/// Resolve the active environment from the raw network setting.
///
/// Any value other than `"devnet"` or `"localhost"`, including an empty or
/// absent setting, is a failure carrying the raw value. There is no default.
pub fn resolve_environment(setting: Option<&str>) -> Result<Env, SystemError> {
    let network = match setting {
        Some(raw) => raw.parse::<Network>(),
        None => Err(unknown_network(None)),
    };
    match network {
        Ok(n) => success(n.env()),
        Err(e) => failure(e),
    }
}

fn unknown_network(raw: Option<&str>) -> SystemError {
    SystemError::unknown_network(json!({ ACTIVE_NETWORK_KEY: raw }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    #[test]
    fn devnet_resolves_to_its_table_entry() {
        let env = resolve_environment(Some("devnet")).unwrap();
        assert_eq!(env, Network::Devnet.env());
        assert_eq!(env.connection_endpoint, "http://localhost:8899");
    }

    #[test]
    fn localhost_resolves_to_its_table_entry() {
        let env = resolve_environment(Some("localhost")).unwrap();
        assert_eq!(env.connection_endpoint, "https://api.devnet.solana.com");
    }

    #[test]
    fn absent_setting_is_failure() {
        let e = resolve_environment(None).unwrap_err();
        assert_eq!(e.message, "Unknown network");
        assert_eq!(e.data[ACTIVE_NETWORK_KEY], Value::Null);
    }

    #[test]
    fn empty_and_wrong_case_are_failures() {
        for raw in ["", "Devnet", "LOCALHOST", " devnet", "mainnet-beta"] {
            let e = resolve_environment(Some(raw)).unwrap_err();
            assert_eq!(e.data[ACTIVE_NETWORK_KEY], raw);
        }
    }

    proptest! {
        #[test]
        fn unrecognized_names_carry_raw_value(raw in "\\PC*") {
            prop_assume!(raw != "devnet" && raw != "localhost");
            let e = resolve_environment(Some(&raw)).unwrap_err();
            prop_assert_eq!(e.data[ACTIVE_NETWORK_KEY].as_str(), Some(raw.as_str()));
        }
    }

    #[test]
    fn names_round_trip_through_display() {
        for n in Network::ALL {
            assert_eq!(n.to_string().parse::<Network>().unwrap(), n);
        }
    }
}
