pub mod deploy;
pub mod ens;

pub use deploy::{DeployPlan, DeployReport, DeployRequest, Deployment};
pub use ens::{APM_TLD, label_hash, namehash, normalize, validate_label};
