//! The `locals` block and `output` blocks.
//!
//! Every output variable is emitted twice: once as a local, so other
//! expressions in the module can refer to `local.<key>`, and once as an
//! `output` block so it is visible to `terraform output`.

use crate::dedupe::dedupe;
use crate::error::{Error, Result};
use crate::model::{OutputValue, OutputVariable};
use std::collections::BTreeMap;
use tfgen_hcl::encode::{block, expression};
use tfgen_hcl::{Attribute, Expression, Structure, Value, sanitize};

/// Emit the outputs fragment.
///
/// Returns nothing when there are no outputs. Otherwise the fragment is a
/// `locals` block followed by one `output` block per variable, ordered by
/// sanitized key.
///
/// # Errors
///
/// - [`Error::DuplicateIdentifier`] if two keys sanitize to the same name
/// - [`Error::TypeMismatch`] if an array mixes incomparable values
/// - [`Error::Encoding`] if a value has no HCL representation
pub fn emit_outputs(outputs: &BTreeMap<String, OutputVariable>) -> Result<Vec<Structure>> {
    if outputs.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted: Vec<(String, &OutputVariable)> = outputs
        .values()
        .map(|output| (sanitize(&output.key), output))
        .collect();
    sorted.sort_by(|(a_name, a), (b_name, b)| {
        a_name.cmp(b_name).then_with(|| a.key.cmp(&b.key))
    });

    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(Error::DuplicateIdentifier {
            name: pair[0].0.clone(),
            first: pair[0].1.key.clone(),
            second: pair[1].1.key.clone(),
        });
    }

    let mut locals = Vec::with_capacity(sorted.len());
    let mut blocks = Vec::with_capacity(sorted.len());
    for (name, output) in &sorted {
        let expr = output_expression(output)?;
        tracing::debug!(output = %name, "Emitting output variable");
        locals.push(Structure::Attribute(Attribute::new(name.as_str(), expr.clone())));
        let value = Structure::Attribute(Attribute::new("value", expr));
        blocks.push(Structure::Block(block("output", [name.as_str()], [value])));
    }

    let mut fragment = Vec::with_capacity(blocks.len() + 1);
    fragment.push(Structure::Block(block("locals", no_labels(), locals)));
    fragment.extend(blocks);
    Ok(fragment)
}

fn no_labels() -> [&'static str; 0] {
    []
}

fn output_expression(output: &OutputVariable) -> Result<Expression> {
    let value = match &output.value {
        OutputValue::Scalar(value) => value.clone(),
        OutputValue::Array(values) => {
            let deduped = dedupe(values).map_err(|source| Error::TypeMismatch {
                key: output.key.clone(),
                source,
            })?;
            Value::List(deduped)
        }
    };
    expression(&value).map_err(|source| Error::Encoding {
        context: format!("output {}", output.key),
        source,
    })
}
