//! # opshell-aws – AWS wire layer
//!
//! Implements [`opshell_core::OperationInvoker`] against real AWS endpoints
//! with SigV4 request signing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  AwsService  (service.rs)                        │
//! │  └── OperationSpec + request → response          │
//! ├──────────────────────────────────────────────────┤
//! │  protocol.rs / xml.rs                            │
//! │  ├── awsJson 1.0 / 1.1  (X-Amz-Target)           │
//! │  ├── restJson1          (URI labels, query)      │
//! │  └── ec2 query          (form body, XML reply)   │
//! ├──────────────────────────────────────────────────┤
//! │  AwsClient  (client.rs)                          │
//! │  └── retry with jittered backoff                 │
//! ├──────────────────────────────────────────────────┤
//! │  SigV4 signing  (signing.rs)                     │
//! └──────────────────────────────────────────────────┘
//! ```

// ── Sub-modules ─────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod service;
pub mod signing;
pub mod xml;

#[cfg(test)]
mod test_server;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use client::{AwsClient, AwsResponse, WireRequest};
pub use config::{
    AwsCredentials, AwsProfile, AwsRegion, CredentialSource, RetryConfig, RetryMode, SdkConfig,
};
pub use error::{AwsError, AwsResult, ErrorKind};
pub use service::AwsService;
