// src/bindings.rs
#![allow(clippy::all)]
use ethers::prelude::abigen;

// Inline ABI for the surface of the Voting contract this tool touches.
// `addCandidate`, `candidatesCount` and `getCandidate` are what the deployer
// itself calls; the rest is kept so downstream code can reuse the binding.
abigen!(
    Voting,
    r#"[
        event CandidateAdded(uint256 indexed candidateId, string name)
        event VoteCast(address indexed voter, uint256 indexed candidateId)
        function owner() external view returns (address)
        function candidatesCount() external view returns (uint256)
        function addCandidate(string name) external
        function getCandidate(uint256 candidateId) external view returns (uint256, string, uint256)
        function vote(uint256 candidateId) external
        function hasVoted(address voter) external view returns (bool)
    ]"#,
    event_derives(serde::Deserialize, serde::Serialize)
);
