//! # Ledger SDK
//!
//! A small SDK for talking to an EVM-compatible node over JSON-RPC, offering the method
//! catalogue, wire models, error handling, legacy transaction encoding and local signing
//! needed to submit and track a native-value transfer.

pub mod client;
pub mod error;
pub mod methods;
pub mod model;
pub mod signer;
pub mod transaction;
