use helius::{Method, RpcRequest};

use crate::libs::config::ProbeTargets;

/// One entry of the fixed probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    TokenSupply,
    TokenAccountBalance,
    Asset,
    TokenAccountsByOwner,
}

impl ProbeKind {
    /// Run order.
    pub const ALL: [ProbeKind; 4] = [
        ProbeKind::TokenSupply,
        ProbeKind::TokenAccountBalance,
        ProbeKind::Asset,
        ProbeKind::TokenAccountsByOwner,
    ];

    /// Key used in the summary.
    pub fn key(self) -> &'static str {
        match self {
            ProbeKind::TokenSupply => "token_supply",
            ProbeKind::TokenAccountBalance => "token_account_balance",
            ProbeKind::Asset => "asset",
            ProbeKind::TokenAccountsByOwner => "token_accounts_by_owner",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProbeKind::TokenSupply => "TEST 1: Get Token Supply",
            ProbeKind::TokenAccountBalance => "TEST 2: Get Token Account Balance",
            ProbeKind::Asset => "TEST 3: Get Asset (DAS API)",
            ProbeKind::TokenAccountsByOwner => "TEST 4: Get Token Accounts by Owner",
        }
    }

    /// What the identifier is, for the diagnostics line.
    pub fn label(self) -> &'static str {
        match self {
            ProbeKind::TokenSupply => "Token Mint",
            ProbeKind::TokenAccountBalance => "Token Account",
            ProbeKind::Asset => "Asset ID",
            ProbeKind::TokenAccountsByOwner => "Owner",
        }
    }

    pub fn method(self) -> Method {
        match self {
            ProbeKind::TokenSupply => Method::GetTokenSupply,
            ProbeKind::TokenAccountBalance => Method::GetTokenAccountBalance,
            ProbeKind::Asset => Method::GetAsset,
            ProbeKind::TokenAccountsByOwner => Method::GetTokenAccountsByOwner,
        }
    }

    pub fn target(self, targets: &ProbeTargets) -> &str {
        match self {
            ProbeKind::TokenSupply => &targets.token_mint,
            ProbeKind::TokenAccountBalance => &targets.token_account,
            ProbeKind::Asset => &targets.asset_id,
            ProbeKind::TokenAccountsByOwner => &targets.owner,
        }
    }

    pub fn request(self, targets: &ProbeTargets) -> RpcRequest {
        self.method().request(self.target(targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn targets() -> ProbeTargets {
        ProbeTargets {
            token_mint: "MINT".into(),
            token_account: "ACCOUNT".into(),
            asset_id: "ASSET".into(),
            owner: "OWNER".into(),
        }
    }

    #[test]
    fn each_probe_sends_its_own_identifier() {
        let t = targets();
        let firsts: Vec<_> = ProbeKind::ALL
            .iter()
            .map(|k| {
                let v = serde_json::to_value(k.request(&t)).unwrap();
                match &v["params"] {
                    serde_json::Value::Array(a) => a[0].clone(),
                    obj => obj["id"].clone(),
                }
            })
            .collect();
        assert_eq!(
            firsts,
            vec![json!("MINT"), json!("ACCOUNT"), json!("ASSET"), json!("OWNER")]
        );
    }

    #[test]
    fn methods_match_run_order() {
        let names: Vec<_> = ProbeKind::ALL.iter().map(|k| k.method().name()).collect();
        assert_eq!(
            names,
            [
                "getTokenSupply",
                "getTokenAccountBalance",
                "getAsset",
                "getTokenAccountsByOwner"
            ]
        );
    }
}
