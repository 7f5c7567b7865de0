//! ENS name hashing (EIP-137).

use alloy::primitives::{B256, keccak256};

use crate::error::{ApmDeployError, Result};

/// Parent domain every APM registry is created under.
pub const APM_TLD: &str = "aragonpm.eth";

/// keccak-256 of a single label's UTF-8 bytes.
pub fn label_hash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Case-folds a name and drops a trailing root dot, the subset of ENS
/// normalization that matters for registry names.
pub fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}

/// Recursive ENS namehash of the normalized name. The empty name (the root)
/// hashes to zero.
pub fn namehash(name: &str) -> B256 {
    let name = normalize(name);
    if name.is_empty() {
        return B256::ZERO;
    }

    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash(label).as_slice());
        keccak256(buf)
    })
}

/// A subdomain label must be a single, non-empty ENS label.
pub fn validate_label(label: &str) -> Result<&str> {
    if label.is_empty() || label.contains('.') {
        return Err(ApmDeployError::InvalidLabel(label.to_string()));
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn test_namehash_root() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(namehash("."), B256::ZERO);
    }

    #[test]
    fn test_namehash_known_vectors() {
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn test_namehash_trailing_dot() {
        assert_eq!(namehash("aragonpm.eth."), namehash("aragonpm.eth"));
    }

    #[test]
    fn test_namehash_ignores_case() {
        assert_eq!(
            namehash("ETH"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(namehash("AragonPM.eth"), namehash("aragonpm.eth"));
        assert_eq!(normalize("Open.AragonPM.eth."), "open.aragonpm.eth");
    }

    #[test]
    fn test_label_hash_is_not_normalized() {
        assert_ne!(label_hash("1Hive"), label_hash("1hive"));
    }

    #[test]
    fn test_namehash_is_child_of_parent() {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(namehash("eth").as_slice());
        buf[32..].copy_from_slice(label_hash("aragonpm").as_slice());
        assert_eq!(namehash(APM_TLD), keccak256(buf));
    }

    #[test]
    fn test_label_hash() {
        assert_eq!(
            label_hash(""),
            b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            label_hash("eth"),
            b256!("4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
        );
        assert_eq!(label_hash("1hive"), keccak256(b"1hive"));
    }

    #[test]
    fn test_validate_label() {
        assert_eq!(validate_label("1hive").unwrap(), "1hive");
        assert!(matches!(
            validate_label(""),
            Err(ApmDeployError::InvalidLabel(_))
        ));
        assert!(matches!(
            validate_label("open.aragonpm"),
            Err(ApmDeployError::InvalidLabel(_))
        ));
    }
}
