use serde_json::{json, Map};

use crate::addresses::TOKEN_PROGRAM_ID;
use crate::rpc::{Params, RpcRequest};

/// The fixed set of remote methods the probe suite exercises. Param
/// shapes are baked in per method and not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetHealth,
    GetTokenSupply,
    GetTokenAccountBalance,
    /// DAS API.
    GetAsset,
    GetTokenAccountsByOwner,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::GetHealth => "getHealth",
            Method::GetTokenSupply => "getTokenSupply",
            Method::GetTokenAccountBalance => "getTokenAccountBalance",
            Method::GetAsset => "getAsset",
            Method::GetTokenAccountsByOwner => "getTokenAccountsByOwner",
        }
    }

    /// Build the request for `target`. `getHealth` ignores it and sends
    /// no params at all.
    pub fn request(self, target: &str) -> RpcRequest {
        let params = match self {
            Method::GetHealth => None,
            Method::GetTokenSupply | Method::GetTokenAccountBalance => {
                Some(Params::Positional(vec![json!(target)]))
            }
            Method::GetAsset => {
                let mut named = Map::new();
                named.insert("id".into(), json!(target));
                named.insert("options".into(), json!({ "showFungible": true }));
                Some(Params::Named(named))
            }
            Method::GetTokenAccountsByOwner => Some(Params::Positional(vec![
                json!(target),
                json!({ "programId": TOKEN_PROGRAM_ID }),
                json!({ "encoding": "jsonParsed" }),
            ])),
        };
        RpcRequest::new(self.name(), params)
    }
}

pub fn health_request() -> RpcRequest {
    Method::GetHealth.request("")
}
