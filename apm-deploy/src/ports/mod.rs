pub mod registry;

pub use registry::ApmChain;
