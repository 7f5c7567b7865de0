pub mod rpc;

pub use rpc::RpcChain;
