//! `resource` blocks.

use crate::error::{Error, Result};
use crate::model::ResourceDescriptor;
use tfgen_hcl::encode::{EncodeError, block, encode_fields};
use tfgen_hcl::{Structure, Value, sanitize};

/// Emit one `resource "<type>" "<name>"` block per descriptor.
///
/// Resources are ordered by type, then sanitized name, then raw name, so the
/// output does not depend on registration order. A `Null` item, or one whose
/// fields all encode to nothing, produces no block but still takes part in
/// duplicate detection.
///
/// # Errors
///
/// - [`Error::DuplicateResource`] if two resources share a type and sanitized name
/// - [`Error::Encoding`] if an item is not a named-field collection or a field
///   cannot be encoded
pub fn emit_resources(resources: &[ResourceDescriptor]) -> Result<Vec<Structure>> {
    let mut sorted: Vec<(String, &ResourceDescriptor)> = resources
        .iter()
        .map(|resource| (sanitize(&resource.resource_name), resource))
        .collect();
    sorted.sort_by(|(a_name, a), (b_name, b)| {
        a.resource_type
            .cmp(&b.resource_type)
            .then_with(|| a_name.cmp(b_name))
            .then_with(|| a.resource_name.cmp(&b.resource_name))
    });

    let mut blocks = Vec::with_capacity(sorted.len());
    let mut previous: Option<(&str, &ResourceDescriptor)> = None;
    for (name, resource) in &sorted {
        if let Some((prev_name, prev)) = previous
            && prev.resource_type == resource.resource_type
            && prev_name == name.as_str()
        {
            return Err(Error::DuplicateResource {
                resource_type: resource.resource_type.clone(),
                name: name.clone(),
                first: prev.resource_name.clone(),
                second: resource.resource_name.clone(),
            });
        }
        previous = Some((name.as_str(), *resource));

        let inner = resource_body(resource)?;
        if inner.is_empty() {
            tracing::debug!(
                resource_type = %resource.resource_type,
                resource = %name,
                "Skipping resource with empty body"
            );
            continue;
        }

        tracing::debug!(
            resource_type = %resource.resource_type,
            resource = %name,
            "Emitting resource"
        );
        let labels = [resource.resource_type.as_str(), name.as_str()];
        blocks.push(Structure::Block(block("resource", labels, inner)));
    }
    Ok(blocks)
}

fn resource_body(resource: &ResourceDescriptor) -> Result<Vec<Structure>> {
    let encoded = match &resource.item {
        Value::Null => Ok(Vec::new()),
        Value::Object(fields) | Value::Map(fields) => encode_fields(fields),
        other => Err(EncodeError::UnsupportedItem {
            found: other.kind(),
        }),
    };
    encoded.map_err(|source| Error::Encoding {
        context: format!("resource {}.{}", resource.resource_type, resource.resource_name),
        source,
    })
}
