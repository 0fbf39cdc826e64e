//! Solana JSON-RPC plumbing: the HTTP [`client`] and the typed
//! [`outcome`] each reply is classified into.
pub mod client;
pub mod outcome;

pub use client::{Exchange, HeliusClient, ProbeError};
pub use outcome::RpcOutcome;
