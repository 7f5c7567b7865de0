use alloy::primitives::B256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApmDeployError {
    #[error("Invalid label {0:?}: must be non-empty and contain no '.'")]
    InvalidLabel(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("No signer configured, set APM_DEPLOY_PRIVATE_KEY or `private_key` in config")]
    MissingSigner,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Contract call {call} failed: {message}")]
    Contract { call: &'static str, message: String },

    #[error("Transaction for {call} reverted: {tx}")]
    TransactionReverted { call: &'static str, tx: B256 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApmDeployError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidLabel(_) | Self::InvalidAddress(_) => 2,
            Self::UnknownNetwork(_) | Self::MissingSigner | Self::Config(_) => 3,
            Self::Contract { .. } | Self::TransactionReverted { .. } => 4,
            Self::Transport(_) | Self::Io(_) | Self::Serialization(_) => 10,
        }
    }

    pub fn contract(call: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Contract {
            call,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApmDeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(ApmDeployError::InvalidLabel("a.b".into()).exit_code(), 2);
        assert_eq!(ApmDeployError::MissingSigner.exit_code(), 3);
        assert_eq!(
            ApmDeployError::TransactionReverted {
                call: "newAPM",
                tx: B256::ZERO,
            }
            .exit_code(),
            4
        );
        assert_eq!(ApmDeployError::Transport("refused".into()).exit_code(), 10);
    }

    #[test]
    fn test_contract_error_message() {
        let err = ApmDeployError::contract("removePermissionManager", "execution reverted");
        assert_eq!(
            err.to_string(),
            "Contract call removePermissionManager failed: execution reverted"
        );
    }
}
