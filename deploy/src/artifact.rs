//! Compiled contract artifacts as written by Hardhat.

use std::fs;
use std::path::Path;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;
use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_PATH: &str = "artifacts/contracts/CryptoDevToken.sol/CryptoDevToken.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("bad artifact {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let artifact: Self = serde_json::from_str(raw).context("not a Hardhat artifact")?;
        if artifact.bytecode.is_empty() {
            bail!(
                "{} has no creation bytecode (interface or abstract contract?)",
                artifact.contract_name
            );
        }
        Ok(artifact)
    }

    /// Creation code followed by the ABI-encoded constructor argument.
    pub fn deploy_data(&self, nft_contract: Address) -> Bytes {
        let mut data = self.bytecode.to_vec();
        data.extend_from_slice(&nft_contract.abi_encode());
        data.into()
    }
}
