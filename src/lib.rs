//! # opshell
//!
//! Command-line host for the schema-driven AWS operation adapter.
//!
//! ```text
//! cli ──► app ──► opshell-core::Adapter ──► opshell-aws::AwsService
//!          │             │
//!        config        host (JSON sink, prompts, pipeline, tracing)
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod host;
