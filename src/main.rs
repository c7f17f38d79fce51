// src/main.rs

use clap::Parser;
use ethers::{
    prelude::{Http, LocalWallet, Middleware, Provider, Signer, SignerMiddleware},
    utils::to_checksum,
};
use eyre::{Result, WrapErr};
use std::{sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

use voting_deployer::{
    add_candidates, append_deployment_record, deploy_voting, fetch_candidates, fetch_gas_price,
    load_config, ContractArtifact, DeploymentRecord,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Deploys the Voting contract and seeds the initial candidates", long_about = None)]
struct Cli {
    /// Path to the compiled Voting artifact (overrides VOTING_ARTIFACT_PATH).
    #[arg(long, value_name = "PATH")]
    artifact: Option<String>,

    /// Candidate to register after deployment; repeatable, in registration
    /// order (overrides INITIAL_CANDIDATES).
    #[arg(long = "candidate", value_name = "NAME")]
    candidates: Vec<String>,

    /// Deploy only; register no candidates.
    #[arg(long, conflicts_with = "candidates")]
    skip_seed: bool,

    /// Confirmation depth for the deployment transaction (overrides
    /// DEPLOY_CONFIRMATIONS).
    #[arg(long, value_name = "N")]
    confirmations: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config()?;
    if let Some(path) = cli.artifact {
        config.artifact_path = path;
    }
    if !cli.candidates.is_empty() {
        config.initial_candidates = cli.candidates;
    }
    if cli.skip_seed {
        config.initial_candidates.clear();
    }
    if let Some(confirmations) = cli.confirmations {
        config.deploy_confirmations = confirmations;
    }

    // Resolve the compiled artifact before touching the network.
    let artifact = ContractArtifact::load(&config.artifact_path)?;
    info!(contract = %artifact.contract_name, path = %config.artifact_path, "artifact loaded");

    let provider = Provider::<Http>::try_from(config.rpc_url.clone())
        .wrap_err("RPC_URL is not a valid HTTP endpoint")?;
    let chain_id = provider
        .get_chainid()
        .await
        .wrap_err_with(|| format!("failed to reach RPC endpoint {}", config.rpc_url))?
        .as_u64();
    let wallet = config
        .deployer_private_key
        .parse::<LocalWallet>()
        .wrap_err("DEPLOYER_PRIVATE_KEY is not a valid private key")?
        .with_chain_id(chain_id);
    info!(chain_id, deployer = ?wallet.address(), "connected");
    let client = Arc::new(SignerMiddleware::new(provider, wallet));

    let gas = fetch_gas_price(client.clone(), config.max_priority_fee_per_gas_gwei).await?;

    let (contract, receipt) =
        deploy_voting(client.clone(), &artifact, &gas, config.deploy_confirmations).await?;
    let address = contract.address();

    let record = DeploymentRecord::new(&artifact.contract_name, address, chain_id, &receipt);
    append_deployment_record(&config.deployments_path, &record)?;

    if config.initial_candidates.is_empty() {
        info!("seeding skipped, no candidates configured");
    } else {
        add_candidates(
            &contract,
            &config.initial_candidates,
            &gas,
            Duration::from_secs(config.tx_timeout_secs),
        )
        .await?;

        // Read the list back so a silently ineffective seed fails the run.
        let on_chain = fetch_candidates(&contract).await?;
        if on_chain != config.initial_candidates {
            eyre::bail!(
                "on-chain candidate list {on_chain:?} does not match the configured list {:?}",
                config.initial_candidates
            );
        }
        info!(candidates = ?on_chain, "initial candidates registered");
    }

    println!("++++++++++++++++++++++++++++++++++++++++++++++");
    println!("Contract Address (copy this for frontend):");
    println!("{}", to_checksum(&address, None));
    println!("++++++++++++++++++++++++++++++++++++++++++++++");
    Ok(())
}
