use alloy::primitives::{Address, B256};
use serde::Serialize;

use super::ens::APM_TLD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub label: String,
    pub apm: Address,
    pub factory: Address,
    pub tld: String,
}

impl DeployRequest {
    pub fn new(label: impl Into<String>, apm: Address, factory: Address) -> Self {
        Self {
            label: label.into(),
            apm,
            factory,
            tld: APM_TLD.to_string(),
        }
    }

    #[must_use]
    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.label, self.tld)
    }
}

/// Everything resolved on-chain before the first transaction is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    pub owner: Address,
    pub tld: String,
    pub tld_node: B256,
    pub label: String,
    pub label_hash: B256,
    pub apm: Address,
    pub factory: Address,
    pub registrar: Address,
    pub kernel: Address,
    pub acl: Address,
    pub create_name_role: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    #[serde(flatten)]
    pub plan: DeployPlan,
    pub remove_manager_tx: B256,
    pub create_permission_tx: B256,
    pub deploy_tx: B256,
    /// `None` when the factory receipt carried no `DeployAPM` event.
    pub new_apm: Option<Address>,
}

/// Outcome of a confirmed `newAPM` transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub tx: B256,
    pub apm: Option<Address>,
}
