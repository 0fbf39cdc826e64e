pub mod addresses;
pub mod methods;
pub mod rpc;

pub use methods::Method;
pub use rpc::{Params, RpcRequest};
