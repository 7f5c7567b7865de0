pub mod deploy;

pub use deploy::DeployService;
