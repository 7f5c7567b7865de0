use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use crate::domain::Deployment;
use crate::error::Result;

/// The contract surface needed to deploy an APM registry.
///
/// Mutating calls return only after the transaction is confirmed, yielding its
/// hash. A confirmed-but-reverted transaction is an error.
#[async_trait]
pub trait ApmChain: Send + Sync {
    async fn signer_address(&self) -> Result<Address>;

    /// `APMRegistry.registrar()`
    async fn registrar(&self, apm: Address) -> Result<Address>;
    /// `AragonApp.kernel()`
    async fn kernel(&self, apm: Address) -> Result<Address>;
    /// `Kernel.acl()`
    async fn acl(&self, kernel: Address) -> Result<Address>;
    /// `ENSSubdomainRegistrar.CREATE_NAME_ROLE()`
    async fn create_name_role(&self, registrar: Address) -> Result<B256>;

    async fn remove_permission_manager(
        &self,
        acl: Address,
        app: Address,
        role: B256,
    ) -> Result<B256>;

    async fn create_permission(
        &self,
        acl: Address,
        entity: Address,
        app: Address,
        role: B256,
        manager: Address,
    ) -> Result<B256>;

    async fn new_apm(
        &self,
        factory: Address,
        tld: B256,
        label: B256,
        root: Address,
    ) -> Result<Deployment>;
}
