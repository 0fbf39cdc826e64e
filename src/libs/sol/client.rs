//! Thin JSON-RPC transport over `reqwest`. One POST per call, no
//! retries, reply decoded as untyped JSON.
use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use helius::rpc::RpcRequest;
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::libs::config::Config;
use crate::log;
use crate::libs::writing::cc;

const SAMPLE_LIMIT: usize = 512;

/// Everything that can go wrong between sending a request and holding a
/// decoded JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,
    /// Full cause chain, e.g. `... tcp connect error: Connection refused`.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error (HTTP {status}): {reason}. {hint} Sample: {sample}")]
    Decode {
        status: u16,
        reason: String,
        hint: &'static str,
        sample: String,
    },
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else {
            // reqwest puts the full URL, key included, into its messages.
            let chain = anyhow::Error::from(e.without_url());
            ProbeError::Transport(format!("{chain:#}"))
        }
    }
}

/// Status line plus decoded body of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub status: u16,
    pub body: Value,
}

#[derive(Clone, Debug)]
pub struct HeliusClient {
    rpc_url: Url,
    http: HttpClient,
}

impl HeliusClient {
    pub fn new(config: &Config) -> Result<Self> {
        let rpc_url = config.endpoint()?;
        let http = HttpClient::builder()
            .build()
            .context("failed to build HTTP client")?;
        log!(cc::CYAN, "rpc client ready for {}", config.redacted_endpoint());
        Ok(Self { rpc_url, http })
    }

    /// POST `request`, bounded by `timeout` when given.
    pub async fn exchange(
        &self,
        request: &RpcRequest,
        timeout: Option<Duration>,
    ) -> Result<Exchange, ProbeError> {
        let mut builder = self.http.post(self.rpc_url.clone()).json(request);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let res = builder.send().await?;
        let status = res.status().as_u16();
        let bytes = res.bytes().await?;
        let body = decode_body(status, &bytes)?;
        Ok(Exchange { status, body })
    }
}

/// Decode a reply body, with a hint about the usual misconfigurations
/// when it is not JSON.
pub fn decode_body(status: u16, bytes: &Bytes) -> Result<Value, ProbeError> {
    serde_json::from_slice(bytes).map_err(|e| {
        let mut sample = String::from_utf8_lossy(bytes).to_string();
        if sample.len() > SAMPLE_LIMIT {
            let mut cut = SAMPLE_LIMIT;
            while !sample.is_char_boundary(cut) {
                cut -= 1;
            }
            sample.truncate(cut);
        }
        let hint = if sample.trim_start().starts_with('<') {
            "Response looks like HTML; the endpoint may be a gateway page or blocked."
        } else if sample.trim().is_empty() {
            "Empty body from RPC. Endpoint may be down or the API key rejected."
        } else {
            "Non-JSON response from RPC."
        };
        ProbeError::Decode {
            status,
            reason: e.to_string(),
            hint,
            sample,
        }
    })
}
