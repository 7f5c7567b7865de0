use std::sync::Arc;

use crate::domain::{
    DeployPlan, DeployReport, DeployRequest, label_hash, namehash, normalize, validate_label,
};
use crate::error::Result;
use crate::ports::ApmChain;

pub struct DeployService<C: ApmChain> {
    chain: Arc<C>,
}

impl<C: ApmChain> DeployService<C> {
    pub const fn new(chain: Arc<C>) -> Self {
        Self { chain }
    }

    /// Resolves the signer, hashes and contract addresses without sending
    /// any transaction.
    pub async fn plan(&self, request: &DeployRequest) -> Result<DeployPlan> {
        let label = validate_label(&request.label)?;

        let owner = self.chain.signer_address().await?;
        tracing::info!(%owner, "Using signer as registry owner");

        let tld = normalize(&request.tld);
        let tld_node = namehash(&tld);
        let label_hash = label_hash(label);

        let registrar = self.chain.registrar(request.apm).await?;
        let kernel = self.chain.kernel(request.apm).await?;
        let acl = self.chain.acl(kernel).await?;
        let create_name_role = self.chain.create_name_role(registrar).await?;
        tracing::debug!(%registrar, %kernel, %acl, %create_name_role, "Resolved registry contracts");

        tracing::info!("ETH: {}", namehash("eth"));
        tracing::info!("TLD: {tld} ({tld_node})");
        tracing::info!("Label: {label} ({label_hash})");

        Ok(DeployPlan {
            owner,
            tld,
            tld_node,
            label: label.to_string(),
            label_hash,
            apm: request.apm,
            factory: request.factory,
            registrar,
            kernel,
            acl,
            create_name_role,
        })
    }

    /// Hands `CREATE_NAME_ROLE` on the registrar to the signer, then asks the
    /// factory for a new registry. Every transaction is confirmed before the
    /// next one is sent; the first failure aborts the sequence.
    pub async fn deploy(&self, request: &DeployRequest) -> Result<DeployReport> {
        let plan = self.plan(request).await?;

        tracing::info!("Removing manager for CREATE_NAME_ROLE");
        // The ACL refuses createPermission while the role still has a manager.
        let remove_manager_tx = self
            .chain
            .remove_permission_manager(plan.acl, plan.registrar, plan.create_name_role)
            .await?;

        tracing::info!(owner = %plan.owner, "Creating CREATE_NAME_ROLE permission for owner");
        let create_permission_tx = self
            .chain
            .create_permission(
                plan.acl,
                plan.owner,
                plan.registrar,
                plan.create_name_role,
                plan.owner,
            )
            .await?;

        tracing::info!("Deploying {} APM...", request.full_name());
        let deployment = self
            .chain
            .new_apm(plan.factory, plan.tld_node, plan.label_hash, plan.owner)
            .await?;

        match deployment.apm {
            Some(apm) => tracing::info!(%apm, tx = %deployment.tx, "APM deployed"),
            None => tracing::warn!(
                tx = %deployment.tx,
                "newAPM confirmed but the receipt has no DeployAPM event"
            ),
        }

        Ok(DeployReport {
            plan,
            remove_manager_tx,
            create_permission_tx,
            deploy_tx: deployment.tx,
            new_apm: deployment.apm,
        })
    }
}
