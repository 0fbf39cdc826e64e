//! JSON-RPC 2.0 request envelope as Helius expects it.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";
/// Every call goes out with the same id; calls are never pipelined.
pub const REQUEST_ID: &str = "1";

/// Call arguments. Solana methods take a positional array, the DAS
/// extension methods take a single object of named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    Positional(Vec<Value>),
    Named(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Option<Params>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: REQUEST_ID.to_string(),
            method: method.into(),
            params,
        }
    }
}
