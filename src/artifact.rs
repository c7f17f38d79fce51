// src/artifact.rs
// Loading of Hardhat-style compiled contract artifacts (ABI + creation code).

use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found at {path:?} (has the contract been compiled?): {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact at {path:?} is not valid artifact JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact at {path:?} carries no deployment bytecode (interface or abstract contract?)")]
    EmptyBytecode { path: PathBuf },
    #[error("artifact at {path:?} has non-hex bytecode: {source}")]
    BadHex {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
}

// The subset of the Hardhat artifact format the deployer needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    abi: Abi,
    bytecode: String,
}

#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Reads and parses a compiled artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref).map_err(|source| ArtifactError::NotFound {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw, path_ref)
    }

    /// Resolves an artifact by contract name under a Hardhat `artifacts/`
    /// tree (`contracts/<Name>.sol/<Name>.json`).
    pub fn find(artifacts_dir: impl AsRef<Path>, contract_name: &str) -> Result<Self, ArtifactError> {
        let path = artifacts_dir
            .as_ref()
            .join("contracts")
            .join(format!("{contract_name}.sol"))
            .join(format!("{contract_name}.json"));
        Self::load(path)
    }

    pub(crate) fn from_json(raw: &str, path: &Path) -> Result<Self, ArtifactError> {
        let parsed: RawArtifact = serde_json::from_str(raw).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let cleaned = parsed.bytecode.trim().trim_start_matches("0x");
        if cleaned.is_empty() {
            return Err(ArtifactError::EmptyBytecode { path: path.to_path_buf() });
        }
        let bytecode = hex::decode(cleaned).map_err(|source| ArtifactError::BadHex {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            contract_name: parsed.contract_name,
            abi: parsed.abi,
            bytecode: Bytes::from(bytecode),
        })
    }
}
