// src/gas.rs
// EIP-1559 fee selection for the deployment and seeding transactions.

use ethers::{providers::Middleware, types::U256, utils::parse_units};
use eyre::{eyre, Result, WrapErr};
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct GasInfo {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Fetches EIP-1559 fees from the endpoint, capping the priority fee at the
/// configured gwei value. Dev chains frequently lack the fee-history API, so
/// a failed estimate falls back to the legacy gas price plus the tip cap.
pub async fn fetch_gas_price<M: Middleware>(
    client: Arc<M>,
    max_priority_fee_gwei: f64,
) -> Result<GasInfo>
where
    <M as Middleware>::Error: StdError + Send + Sync + 'static,
{
    let priority_cap_wei: U256 =
        parse_units(max_priority_fee_gwei.to_string(), "gwei")?.into();

    match client.estimate_eip1559_fees(None).await {
        Ok((max_fee, max_priority_fee)) => {
            let max_priority_fee = max_priority_fee.min(priority_cap_wei);
            debug!(%max_fee, %max_priority_fee, "EIP-1559 fees estimated");
            Ok(GasInfo {
                max_fee_per_gas: max_fee.max(max_priority_fee),
                max_priority_fee_per_gas: max_priority_fee,
            })
        }
        Err(e) => {
            warn!(error = ?e, "EIP-1559 fee estimation failed, falling back to legacy gas price");
            let legacy_price = client
                .get_gas_price()
                .await
                .map_err(|e_legacy| eyre!(e_legacy))
                .wrap_err("both EIP-1559 and legacy gas price fetch failed")?;
            let max_fee = legacy_price + priority_cap_wei;
            debug!(%max_fee, %priority_cap_wei, "using legacy fallback fees");
            Ok(GasInfo {
                max_fee_per_gas: max_fee,
                max_priority_fee_per_gas: priority_cap_wei,
            })
        }
    }
}
