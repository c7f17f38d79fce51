// src/config.rs

use dotenv::dotenv;
use eyre::{Result, WrapErr};
use std::env;

pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/Voting.sol/Voting.json";
pub const DEFAULT_CANDIDATES: &str = "Alice,Bob,Charlie";
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

#[derive(Debug, Clone)]
pub struct Config {
    // Network & Keys
    pub rpc_url: String,
    pub deployer_private_key: String,

    // Artifact & Seeding
    pub artifact_path: String,
    pub initial_candidates: Vec<String>,

    // Confirmation & Timeout Options
    pub deploy_confirmations: usize,
    pub tx_timeout_secs: u64,

    // Gas Pricing Options
    pub max_priority_fee_per_gas_gwei: f64,

    // Output
    pub deployments_path: String,
}

pub fn load_config() -> Result<Config> {
    dotenv().ok();

    let parse_f64_env = |var_name: &str, default: f64| -> f64 {
        env::var(var_name).ok().and_then(|s| s.parse::<f64>().ok()).unwrap_or(default)
    };
    let parse_u64_env = |var_name: &str, default: u64| -> u64 {
        env::var(var_name).ok().and_then(|s| s.parse::<u64>().ok()).unwrap_or(default)
    };
    let parse_usize_env = |var_name: &str, default: usize| -> usize {
        env::var(var_name).ok().and_then(|s| s.parse::<usize>().ok()).unwrap_or(default)
    };
    let string_env_or = |var_name: &str, default: &str| -> String {
        env::var(var_name).ok().filter(|s| !s.is_empty()).unwrap_or_else(|| default.to_string())
    };

    let rpc_url = env::var("RPC_URL").wrap_err("RPC_URL must be set")?;
    let deployer_private_key =
        env::var("DEPLOYER_PRIVATE_KEY").wrap_err("DEPLOYER_PRIVATE_KEY must be set")?;
    let artifact_path = string_env_or("VOTING_ARTIFACT_PATH", DEFAULT_ARTIFACT_PATH);
    let initial_candidates =
        parse_candidate_list(&string_env_or("INITIAL_CANDIDATES", DEFAULT_CANDIDATES))
            .wrap_err("INITIAL_CANDIDATES is malformed")?;
    let deploy_confirmations = parse_usize_env("DEPLOY_CONFIRMATIONS", 1);
    let tx_timeout_secs = parse_u64_env("TX_TIMEOUT_SECS", 120);
    let max_priority_fee_per_gas_gwei = parse_f64_env("MAX_PRIORITY_FEE_PER_GAS_GWEI", 1.0);
    let deployments_path = string_env_or("DEPLOYMENTS_PATH", DEFAULT_DEPLOYMENTS_PATH);

    Ok(Config {
        rpc_url,
        deployer_private_key,
        artifact_path,
        initial_candidates,
        deploy_confirmations,
        tx_timeout_secs,
        max_priority_fee_per_gas_gwei,
        deployments_path,
    })
}

/// Splits a comma-separated candidate list, trimming whitespace around each
/// name. Empty entries and duplicates are rejected up front so a bad list
/// fails before any transaction is sent.
pub fn parse_candidate_list(raw: &str) -> Result<Vec<String>> {
    let names: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if names.is_empty() && !raw.trim().is_empty() {
        eyre::bail!("candidate list {raw:?} contains no usable names");
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            eyre::bail!("candidate {name:?} appears more than once");
        }
    }
    Ok(names)
}
