// src/deploy.rs

use crate::artifact::ContractArtifact;
use crate::bindings::Voting;
use crate::gas::GasInfo;
use chrono::{DateTime, Utc};
use ethers::{
    prelude::{ContractFactory, Http, LocalWallet, Provider, SignerMiddleware},
    types::{Address, TransactionReceipt, TxHash},
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path, sync::Arc};
use tracing::info;

/// The signing client every deployment transaction goes through.
pub type DeployClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Deploys the Voting contract from its compiled artifact and blocks until
/// the network has confirmed the deployment transaction to the requested
/// depth. The bound contract instance plus the deployment receipt come back
/// on success; the address is always available once the receipt is in.
pub async fn deploy_voting(
    client: Arc<DeployClient>,
    artifact: &ContractArtifact,
    gas: &GasInfo,
    confirmations: usize,
) -> Result<(Voting<DeployClient>, TransactionReceipt)> {
    info!(contract = %artifact.contract_name, "sending deployment transaction");

    let factory = ContractFactory::new(
        artifact.abi.clone(),
        artifact.bytecode.clone(),
        client.clone(),
    );

    // No constructor arguments: the contract seeds its own owner from the
    // transaction sender.
    let mut deployer = factory
        .deploy(())
        .wrap_err("failed to construct the deployment transaction")?
        .confirmations(confirmations);
    if let Some(tx) = deployer.tx.as_eip1559_mut() {
        tx.max_fee_per_gas = Some(gas.max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(gas.max_priority_fee_per_gas);
    }

    let (instance, receipt) = deployer
        .send_with_receipt()
        .await
        .wrap_err_with(|| format!("deployment of {} failed", artifact.contract_name))?;

    info!(
        address = ?instance.address(),
        block = ?receipt.block_number,
        tx = ?receipt.transaction_hash,
        "contract deployed"
    );
    Ok((Voting::new(instance.address(), client), receipt))
}

/// One line of the deployments file the front-end reads its address from.
/// Re-runs append a fresh record; a contract is never reused across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub chain_id: u64,
    pub block_number: Option<u64>,
    pub transaction_hash: TxHash,
    pub deployed_at: DateTime<Utc>,
}

impl DeploymentRecord {
    pub fn new(
        contract_name: &str,
        address: Address,
        chain_id: u64,
        receipt: &TransactionReceipt,
    ) -> Self {
        Self {
            contract_name: contract_name.to_string(),
            address,
            chain_id,
            block_number: receipt.block_number.map(|n| n.as_u64()),
            transaction_hash: receipt.transaction_hash,
            deployed_at: Utc::now(),
        }
    }
}

/// Appends a record to the deployments file, creating it on first use.
pub fn append_deployment_record(path: impl AsRef<Path>, record: &DeploymentRecord) -> Result<()> {
    let path_ref = path.as_ref();
    let mut records: Vec<DeploymentRecord> = match fs::read_to_string(path_ref) {
        Ok(raw) => serde_json::from_str(&raw)
            .wrap_err_with(|| format!("existing deployments file {path_ref:?} is not valid JSON"))?,
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(e).wrap_err_with(|| format!("failed to read deployments file {path_ref:?}"))
        }
    };
    records.push(record.clone());
    fs::write(path_ref, serde_json::to_string_pretty(&records)?)
        .wrap_err_with(|| format!("failed to write deployments file {path_ref:?}"))?;
    info!(path = ?path_ref, total = records.len(), "deployment recorded");
    Ok(())
}
