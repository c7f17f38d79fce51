// src/lib.rs
// Library interface for the Voting contract deployer; the binary and the
// integration tests both go through these exports.

pub mod artifact;
pub mod bindings;
pub mod config;
pub mod deploy;
pub mod gas;
pub mod seed;

pub use artifact::{ArtifactError, ContractArtifact};
pub use bindings::Voting;
pub use config::{load_config, parse_candidate_list, Config};
pub use deploy::{append_deployment_record, deploy_voting, DeployClient, DeploymentRecord};
pub use gas::{fetch_gas_price, GasInfo};
pub use seed::{add_candidates, fetch_candidates};
