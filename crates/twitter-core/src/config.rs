//! Configuration structures for twitter-core.
//!
//! Configuration objects are explicit and built by the caller (CLI, tests).
//! The core crate does not read environment variables; the network setting is
//! passed in as a raw string and resolved by [`crate::network`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{SystemError, UserError};
use crate::network::{resolve_environment, Env};

/// Global configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Raw network setting, e.g. "devnet". Resolved on every call.
    pub network: Option<String>,
    /// Base-58 program id override.
    pub program_id: Option<String>,
    pub confirm: ConfirmOptions,
}

impl ClientConfig {
    /// Resolve the configured network. Not cached.
    pub fn env(&self) -> Result<Env, SystemError> {
        resolve_environment(self.network.as_deref())
    }
}

/// Transaction confirmation options, mirroring the Anchor provider defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOptions {
    pub preflight_commitment: CommitmentLevel,
    pub commitment: CommitmentLevel,
    pub skip_preflight: bool,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            preflight_commitment: CommitmentLevel::Processed,
            commitment: CommitmentLevel::Processed,
            skip_preflight: false,
        }
    }
}

/// Supported commitment levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    Processed,
    Confirmed,
    Finalized,
}

impl CommitmentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitmentLevel {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(UserError::new(
                "Unknown commitment level",
                json!({ "commitment": s }),
            )),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> Result<(), SystemError> {
    if let Some(id) = cfg.program_id.as_deref() {
        if id.trim().is_empty() {
            return Err(SystemError::new(
                "program id must not be empty",
                json!({ "programId": id }),
            ));
        }
    }

    if cfg.confirm.skip_preflight && cfg.confirm.preflight_commitment != CommitmentLevel::Processed {
        return Err(SystemError::new(
            "preflight commitment has no effect when preflight is skipped",
            json!({ "confirm": cfg.confirm }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ClientConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.confirm.commitment, CommitmentLevel::Processed);
    }

    #[test]
    fn default_config_has_no_network() {
        let e = ClientConfig::default().env().unwrap_err();
        assert_eq!(e.message, "Unknown network");
    }

    #[test]
    fn empty_program_id_detected() {
        let cfg = ClientConfig {
            program_id: Some("  ".to_string()),
            ..ClientConfig::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn skipped_preflight_with_commitment_detected() {
        let mut cfg = ClientConfig::default();
        cfg.confirm.skip_preflight = true;
        cfg.confirm.preflight_commitment = CommitmentLevel::Finalized;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn commitment_parses() {
        assert_eq!("confirmed".parse::<CommitmentLevel>().unwrap(), CommitmentLevel::Confirmed);
        assert!("Confirmed".parse::<CommitmentLevel>().is_err());
    }
}
