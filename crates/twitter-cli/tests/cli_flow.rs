//! cli_flow.rs
//!
//! Runs the built `solana-twitter` binary.
//!
//! The environment tests need no network. The send flow is skipped by default;
//! to enable it, set:
//! - TWITTER_RUN_CHAIN_TESTS=1
//! - TWITTER_KEYPAIR: a funded keypair file on the selected network
//! - ACTIVE_NETWORK (optional): defaults to devnet

use std::env;
use std::process::{Command, Output};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_solana-twitter"));
    cmd.env_remove("ACTIVE_NETWORK")
        .env_remove("TWITTER_PROGRAM_ID")
        .env_remove("TWITTER_KEYPAIR")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).expect("stdout is json")
}

#[test]
fn env_resolves_devnet() {
    let out = bin().args(["--json", "env"]).env("ACTIVE_NETWORK", "devnet").output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v = stdout_json(&out);
    assert_eq!(v["network"], "devnet");
    assert_eq!(v["connectionEndpoint"], "http://localhost:8899");
}

#[test]
fn env_flag_overrides_variable() {
    let out = bin()
        .args(["--json", "--network", "localhost", "env"])
        .env("ACTIVE_NETWORK", "devnet")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["connectionEndpoint"], "https://api.devnet.solana.com");
}

#[test]
fn unknown_network_fails_with_system_error() {
    let out = bin().args(["--json", "--network", "mainnet", "env"]).output().unwrap();
    assert!(!out.status.success());

    let v = stdout_json(&out);
    assert_eq!(v["type"], "system");
    assert_eq!(v["message"], "Unknown network");
    assert_eq!(v["data"]["ACTIVE_NETWORK"], "mainnet");
}

#[test]
fn send_without_wallet_is_user_error() {
    let out = bin().args(["--json", "--network", "devnet", "send"]).output().unwrap();
    assert!(!out.status.success());

    let v = stdout_json(&out);
    assert_eq!(v["type"], "user");
    assert_eq!(v["message"], "No wallet");
}

#[test]
fn send_devnet_smoke() {
    if env::var("TWITTER_RUN_CHAIN_TESTS").ok().as_deref() != Some("1") {
        eprintln!("skip: set TWITTER_RUN_CHAIN_TESTS=1 to enable the send flow test");
        return;
    }
    let Ok(keypair) = env::var("TWITTER_KEYPAIR") else {
        eprintln!("skip: TWITTER_KEYPAIR not set");
        return;
    };
    let network = env::var("ACTIVE_NETWORK").unwrap_or_else(|_| "devnet".to_string());

    let out = bin()
        .args(["--json", "--network", &network, "--keypair", &keypair, "send", "--topic", "ci", "--content", "smoke"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v = stdout_json(&out);
    assert_eq!(v["topic"], "ci");
    assert_eq!(v["content"], "smoke");
}
