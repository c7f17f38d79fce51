// src/seed.rs
// Registration of the initial candidates and read-back of the on-chain list.

use crate::bindings::Voting;
use crate::gas::GasInfo;
use ethers::{providers::Middleware, types::U256};
use eyre::{eyre, Result, WrapErr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;

/// Registers candidates strictly in order, one transaction at a time. Each
/// `addCandidate` call is awaited to its receipt and checked for on-chain
/// success before the next name goes out; any failure aborts the remaining
/// names so the contract is never left with a gap in the configured order.
pub async fn add_candidates<M: Middleware + 'static>(
    contract: &Voting<M>,
    names: &[String],
    gas: &GasInfo,
    receipt_timeout: Duration,
) -> Result<()> {
    for name in names {
        info!(candidate = %name, "registering candidate");

        let mut call = contract.add_candidate(name.clone());
        if let Some(tx) = call.tx.as_eip1559_mut() {
            tx.max_fee_per_gas = Some(gas.max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(gas.max_priority_fee_per_gas);
        }

        let pending = call
            .send()
            .await
            .wrap_err_with(|| format!("addCandidate({name:?}) submission failed"))?;
        let tx_hash = pending.tx_hash();

        let receipt = timeout(receipt_timeout, pending)
            .await
            .map_err(|_| {
                eyre!(
                    "timed out after {}s waiting for addCandidate({name:?}) receipt (tx {tx_hash:?})",
                    receipt_timeout.as_secs()
                )
            })?
            .wrap_err_with(|| format!("error waiting for addCandidate({name:?}) receipt"))?
            .ok_or_else(|| {
                eyre!("addCandidate({name:?}) transaction dropped from the mempool (tx {tx_hash:?})")
            })?;

        if receipt.status != Some(1.into()) {
            eyre::bail!(
                "addCandidate({name:?}) reverted on-chain (status {:?}, tx {:?})",
                receipt.status,
                receipt.transaction_hash
            );
        }
        info!(candidate = %name, block = ?receipt.block_number, tx = ?receipt.transaction_hash, "candidate registered");
    }
    Ok(())
}

/// Reads the full candidate list back in contract order. Used to verify the
/// seeding took effect, and by the front-end smoke tests.
pub async fn fetch_candidates<M: Middleware + 'static>(contract: &Voting<M>) -> Result<Vec<String>> {
    let count = contract
        .candidates_count()
        .call()
        .await
        .wrap_err("candidatesCount query failed")?;

    let mut names = Vec::new();
    let mut id = U256::zero();
    while id < count {
        let (_, name, _votes) = contract
            .get_candidate(id)
            .call()
            .await
            .wrap_err_with(|| format!("getCandidate({id}) query failed"))?;
        names.push(name);
        id += U256::one();
    }
    Ok(names)
}
