//! # tfgen
//!
//! Command-line front end for the Terraform emitter. It reads a declarative
//! model file, builds an [`tfgen_emitter::EmissionContext`] from it and writes
//! `kubernetes.tf` plus its `data/` files, rewriting only what changed.
//!
//! ```text
//! tfgen generate --input cluster.yaml --out-dir terraform/
//! tfgen generate --input cluster.yaml --out-dir terraform/ --check
//! tfgen sanitize "nodes.example.com"
//! ```

pub mod cli;
pub mod commands;
pub mod errors;
pub mod model;
pub mod sync;
pub mod tracing;

pub use errors::{CliError, Result};
