use std::sync::Arc;

use alloy::primitives::Address;

use crate::adapters::RpcChain;
use crate::config::Config;
use crate::domain::{DeployPlan, DeployReport, DeployRequest, validate_label};
use crate::error::{ApmDeployError, Result};
use crate::services::DeployService;

use super::print_json;

pub struct Args {
    pub name: String,
    pub apm: String,
    pub factory: String,
    pub tld: String,
    pub dry_run: bool,
}

pub async fn run(
    args: Args,
    network: Option<&str>,
    rpc_url: Option<&str>,
    json: bool,
) -> Result<i32> {
    validate_label(&args.name)?;
    let request = DeployRequest::new(
        args.name,
        parse_address(&args.apm)?,
        parse_address(&args.factory)?,
    )
    .with_tld(args.tld);

    let target = Config::load()?.resolve(network, rpc_url)?;
    tracing::info!(network = %target.network, rpc_url = %target.rpc_url, "Connecting");

    let chain = RpcChain::connect(&target.rpc_url, target.require_private_key()?)?;
    if let Some(chain_id) = target.chain_id {
        chain.verify_chain_id(chain_id).await?;
    }
    let service = DeployService::new(Arc::new(chain));

    if args.dry_run {
        let plan = service.plan(&request).await?;
        if json {
            print_json(&plan)?;
        } else {
            print_plan(&plan);
        }
        return Ok(0);
    }

    let report = service.deploy(&request).await?;
    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    Ok(exit_code(&report))
}

/// 1 when `newAPM` was confirmed but emitted no `DeployAPM` event.
fn exit_code(report: &DeployReport) -> i32 {
    i32::from(report.new_apm.is_none())
}

fn parse_address(value: &str) -> Result<Address> {
    value
        .trim()
        .parse()
        .map_err(|_| ApmDeployError::InvalidAddress(value.to_string()))
}

fn print_plan(plan: &DeployPlan) {
    println!("=========");
    println!("Owner:            {}", plan.owner);
    println!("TLD:              {} ({})", plan.tld, plan.tld_node);
    println!("Label:            {} ({})", plan.label, plan.label_hash);
    println!("Registrar:        {}", plan.registrar);
    println!("Kernel:           {}", plan.kernel);
    println!("ACL:              {}", plan.acl);
    println!("CREATE_NAME_ROLE: {}", plan.create_name_role);
    println!("=========");
    println!("Dry run: no transactions sent");
}

fn print_report(report: &DeployReport) {
    println!("=========");
    println!("# {} APM:", report.plan.label);
    match report.new_apm {
        Some(apm) => println!("Address: {apm}"),
        None => println!("Address: (no DeployAPM event in receipt)"),
    }
    println!("Name: {}.{}", report.plan.label, report.plan.tld);
    println!("Transaction hash: {}", report.deploy_tx);
    println!("=========");
}
