//! `ApmChain` over Ethereum JSON-RPC, signing locally with a private key.

use alloy::contract::Error as ContractError;
use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, B256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;

use crate::domain::Deployment;
use crate::error::{ApmDeployError, Result};
use crate::ports::ApmChain;

sol! {
    #[sol(rpc)]
    interface APMRegistry {
        function registrar() external view returns (address);
        function kernel() external view returns (address);
    }

    #[sol(rpc)]
    interface ENSSubdomainRegistrar {
        function CREATE_NAME_ROLE() external view returns (bytes32);
    }

    #[sol(rpc)]
    interface Kernel {
        function acl() external view returns (address);
    }

    #[sol(rpc)]
    interface ACL {
        function removePermissionManager(address _app, bytes32 _role) external;
        function createPermission(address _entity, address _app, bytes32 _role, address _manager) external;
    }

    #[sol(rpc)]
    interface APMRegistryFactory {
        event DeployAPM(bytes32 indexed node, address apm);

        function newAPM(bytes32 _tld, bytes32 _label, address _root) external returns (address);
    }
}

pub struct RpcChain {
    provider: DynProvider,
    signer: Address,
}

impl RpcChain {
    pub fn connect(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| ApmDeployError::Config(format!("invalid private key: {e}")))?;
        let address = signer.address();

        let url: Url = rpc_url
            .parse()
            .map_err(|e| ApmDeployError::Config(format!("invalid RPC URL {rpc_url}: {e}")))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect_http(url)
            .erased();

        tracing::debug!(%address, rpc_url, "Connected signer");
        Ok(Self::with_provider(provider, address))
    }

    /// Wraps a provider that already signs for `signer`.
    pub fn with_provider(provider: DynProvider, signer: Address) -> Self {
        Self { provider, signer }
    }

    /// Fails when the endpoint serves a different chain than configured.
    pub async fn verify_chain_id(&self, expected: u64) -> Result<()> {
        let actual = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ApmDeployError::Transport(e.to_string()))?;

        if actual != expected {
            return Err(ApmDeployError::Config(format!(
                "endpoint reports chain id {actual}, expected {expected}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ApmChain for RpcChain {
    async fn signer_address(&self) -> Result<Address> {
        Ok(self.signer)
    }

    async fn registrar(&self, apm: Address) -> Result<Address> {
        APMRegistry::new(apm, &self.provider)
            .registrar()
            .call()
            .await
            .map_err(|e| call_error("registrar", e))
    }

    async fn kernel(&self, apm: Address) -> Result<Address> {
        APMRegistry::new(apm, &self.provider)
            .kernel()
            .call()
            .await
            .map_err(|e| call_error("kernel", e))
    }

    async fn acl(&self, kernel: Address) -> Result<Address> {
        Kernel::new(kernel, &self.provider)
            .acl()
            .call()
            .await
            .map_err(|e| call_error("acl", e))
    }

    async fn create_name_role(&self, registrar: Address) -> Result<B256> {
        ENSSubdomainRegistrar::new(registrar, &self.provider)
            .CREATE_NAME_ROLE()
            .call()
            .await
            .map_err(|e| call_error("CREATE_NAME_ROLE", e))
    }

    async fn remove_permission_manager(
        &self,
        acl: Address,
        app: Address,
        role: B256,
    ) -> Result<B256> {
        const CALL: &str = "removePermissionManager";
        let pending = ACL::new(acl, &self.provider)
            .removePermissionManager(app, role)
            .send()
            .await
            .map_err(|e| call_error(CALL, e))?;
        let receipt = confirm(CALL, pending).await?;
        Ok(receipt.transaction_hash)
    }

    async fn create_permission(
        &self,
        acl: Address,
        entity: Address,
        app: Address,
        role: B256,
        manager: Address,
    ) -> Result<B256> {
        const CALL: &str = "createPermission";
        let pending = ACL::new(acl, &self.provider)
            .createPermission(entity, app, role, manager)
            .send()
            .await
            .map_err(|e| call_error(CALL, e))?;
        let receipt = confirm(CALL, pending).await?;
        Ok(receipt.transaction_hash)
    }

    async fn new_apm(
        &self,
        factory: Address,
        tld: B256,
        label: B256,
        root: Address,
    ) -> Result<Deployment> {
        const CALL: &str = "newAPM";
        let pending = APMRegistryFactory::new(factory, &self.provider)
            .newAPM(tld, label, root)
            .send()
            .await
            .map_err(|e| call_error(CALL, e))?;
        let receipt = confirm(CALL, pending).await?;

        Ok(Deployment {
            tx: receipt.transaction_hash,
            apm: deployed_apm(factory, receipt.inner.logs()),
        })
    }
}

async fn confirm(
    call: &'static str,
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TransactionReceipt> {
    let tx = *pending.tx_hash();
    tracing::debug!(%tx, "Waiting for {call} confirmation");

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ApmDeployError::contract(call, e))?;

    ensure_success(call, receipt)
}

/// A mined transaction can still have reverted.
fn ensure_success(call: &'static str, receipt: TransactionReceipt) -> Result<TransactionReceipt> {
    if !receipt.status() {
        return Err(ApmDeployError::TransactionReverted {
            call,
            tx: receipt.transaction_hash,
        });
    }
    Ok(receipt)
}

/// Address carried by the first `DeployAPM` event the factory emitted.
fn deployed_apm(factory: Address, logs: &[Log]) -> Option<Address> {
    logs.iter()
        .filter(|log| log.address() == factory)
        .find_map(|log| log.log_decode::<APMRegistryFactory::DeployAPM>().ok())
        .map(|log| log.inner.data.apm)
}

fn call_error(call: &'static str, err: ContractError) -> ApmDeployError {
    match err {
        ContractError::TransportError(e) if e.is_transport_error() => {
            ApmDeployError::Transport(e.to_string())
        }
        other => ApmDeployError::contract(call, other),
    }
}
