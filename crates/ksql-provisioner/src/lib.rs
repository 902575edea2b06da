//! KSQL Provisioner
//!
//! Declares the `turnstile` and `turnstile_summary` tables on a ksqlDB server
//! unless the summary table is already there.
//!
//! This crate provides:
//! - Environment configuration for the ksqlDB endpoint
//! - ksqlDB REST client for statement execution and table lookup
//! - The idempotent check-then-execute provisioner

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod provisioner;
pub mod statement;

pub use client::KsqlClient;
pub use config::ProvisionerConfig;
pub use error::{ProvisionError, ProvisionResult};
pub use provisioner::{ExecutionOutcome, Provisioner, ProvisioningResult};
pub use statement::ProvisioningRequest;
