//! Assembly of the complete Terraform document.

use crate::context::EmissionContext;
use crate::error::{Error, Result};
use crate::outputs::emit_outputs;
use crate::provider::{FeatureFlags, ProviderConfig};
use crate::resources::emit_resources;
use tfgen_hcl::encode::{EncodeError, block, encode_field, render};
use tfgen_hcl::{Attribute, Block, Body, Structure, Value};
use tracing::instrument;

/// Name under which the document is stored in the context's file map.
pub const DOCUMENT_FILE_NAME: &str = "kubernetes.tf";

/// Minimum Terraform version the generated syntax needs.
pub const REQUIRED_TERRAFORM_VERSION: &str = ">= 0.12.26";

/// Render the document for a context without storing it.
///
/// The layout is fixed: outputs (locals and output blocks), the provider
/// block, resource blocks, and finally the `terraform` block declaring the
/// required providers. Spacing and indentation are left to the `hcl`
/// formatter.
///
/// # Errors
///
/// Returns the first error raised while emitting outputs, the provider block
/// or resources.
#[instrument(
    name = "render_document",
    skip_all,
    fields(
        cloud = %ctx.provider().cloud,
        resources = ctx.resources().len(),
        outputs = ctx.outputs().len()
    )
)]
pub fn render_document(ctx: &EmissionContext) -> Result<Vec<u8>> {
    let body = Body::builder()
        .add_structures(emit_outputs(ctx.outputs())?)
        .add_block(provider_block(ctx.provider())?)
        .add_structures(emit_resources(ctx.resources())?)
        .add_block(terraform_block(ctx.provider(), ctx.features())?)
        .build();

    let text = render(&body).map_err(|source| encoding("document", source))?;
    Ok(text.into_bytes())
}

/// Render the document and store it under [`DOCUMENT_FILE_NAME`].
///
/// Nothing is stored when rendering fails.
///
/// # Errors
///
/// Returns the error raised by [`render_document`].
pub fn assemble(ctx: &mut EmissionContext) -> Result<()> {
    let bytes = render_document(ctx)?;
    tracing::info!(
        file = DOCUMENT_FILE_NAME,
        bytes = bytes.len(),
        resources = ctx.resources().len(),
        outputs = ctx.outputs().len(),
        "Assembled Terraform document"
    );
    ctx.insert_file(DOCUMENT_FILE_NAME, bytes);
    Ok(())
}

fn encoding(context: &str, source: EncodeError) -> Error {
    Error::Encoding {
        context: context.to_string(),
        source,
    }
}

/// `region` comes first; an extra `region` entry overrides it in place.
fn provider_block(provider: &ProviderConfig) -> Result<Block> {
    let region = provider.extra_config.get("region").unwrap_or(&provider.region);
    let mut structures = vec![Structure::Attribute(Attribute::new("region", region.as_str()))];
    for (key, value) in provider.extra_config.iter().filter(|(key, _)| key.as_str() != "region") {
        let fields = encode_field(key, &Value::from(value.as_str()))
            .map_err(|source| encoding("provider configuration", source))?;
        structures.extend(fields);
    }
    Ok(block("provider", [provider.cloud.external_name()], structures))
}

fn terraform_block(provider: &ProviderConfig, features: FeatureFlags) -> Result<Block> {
    let mut required = Vec::new();
    for plugin in provider.cloud.spec().required_for(features) {
        let requirement = Value::map([("source", plugin.source), ("version", plugin.version)]);
        let fields = encode_field(plugin.name, &requirement)
            .map_err(|source| encoding("required providers", source))?;
        required.extend(fields);
    }

    let required_providers = block("required_providers", no_labels(), required);
    Ok(block(
        "terraform",
        no_labels(),
        [
            Structure::Attribute(Attribute::new("required_version", REQUIRED_TERRAFORM_VERSION)),
            Structure::Block(required_providers),
        ],
    ))
}

fn no_labels() -> [&'static str; 0] {
    []
}
