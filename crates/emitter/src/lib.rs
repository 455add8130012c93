//! # tfgen-emitter
//!
//! Turns an [`EmissionContext`] filled with resource descriptors and output
//! variables into a Terraform document whose bytes depend only on the logical
//! input: resources and outputs are sorted before emission, duplicate
//! identities are rejected, and every value goes through the same encoder and
//! formatter.
//!
//! ## Document layout
//!
//! ```text
//! locals { ... }                     # only when outputs exist
//! output "<key>" { value = ... }     # one per output
//! provider "<name>" { ... }
//! resource "<type>" "<name>" { ... } # one per resource
//! terraform { required_providers { ... } }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tfgen_emitter::{CloudProvider, EmissionContext, ProviderConfig, DOCUMENT_FILE_NAME};
//! use tfgen_hcl::Value;
//!
//! let mut ctx = EmissionContext::new(ProviderConfig::new(CloudProvider::Aws, "us-east-1"));
//! ctx.render_resource("widget", "My Widget!", Value::object([("size", 3)]));
//! ctx.add_output_variable_array("ids", Value::from("a"))?;
//!
//! tfgen_emitter::assemble(&mut ctx)?;
//!
//! let document = String::from_utf8_lossy(ctx.file(DOCUMENT_FILE_NAME).unwrap_or_default());
//! assert!(document.contains("resource \"widget\" \"My_Widget_\" {\n  size = 3\n}"));
//! # Ok::<(), tfgen_emitter::Error>(())
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod dedupe;
pub mod document;
mod error;
pub mod model;
pub mod outputs;
pub mod provider;
pub mod resources;

pub use context::EmissionContext;
pub use dedupe::{KindMismatch, dedupe};
pub use document::{DOCUMENT_FILE_NAME, REQUIRED_TERRAFORM_VERSION, assemble, render_document};
pub use error::{Error, Result};
pub use model::{OutputValue, OutputVariable, ResourceDescriptor};
pub use provider::{
    CloudProvider, Feature, FeatureFlags, ProviderConfig, ProviderSpec, RequiredProvider,
};
