//! # apm-deploy
//!
//! Deploys an Aragon Package Manager registry under `<label>.aragonpm.eth`.
//!
//! The caller takes over `CREATE_NAME_ROLE` on the parent registry's ENS
//! subdomain registrar, then asks an `APMRegistryFactory` for the new
//! registry.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use apm_deploy::adapters::RpcChain;
//! use apm_deploy::domain::DeployRequest;
//! use apm_deploy::services::DeployService;
//!
//! # async fn run() -> apm_deploy::Result<()> {
//! let chain = RpcChain::connect("http://127.0.0.1:8545", "0x...")?;
//! let service = DeployService::new(Arc::new(chain));
//!
//! let request = DeployRequest::new(
//!     "1hive",
//!     "0x78e08e43244187f2b922241ce7397d8f013a02d6".parse().unwrap(),
//!     "0x5e5de5f3dae619b5469b02a3d50ffb7602f6e726".parse().unwrap(),
//! );
//! let report = service.deploy(&request).await?;
//! println!("{:?}", report.new_apm);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ports;
pub mod services;

pub use error::{ApmDeployError, Result};
