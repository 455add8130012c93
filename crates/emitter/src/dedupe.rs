//! De-duplication of output array values.
//!
//! Terraform rejects or mis-handles repeated values in set-like outputs, and
//! upstream tasks routinely register the same value more than once (every
//! subnet in a zone adding the same route table, for example). Arrays are
//! therefore de-duplicated before they are written.

use tfgen_hcl::{Value, ValueKind};

/// An array element that cannot be compared with the ones before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element {index} is {found}, expected a value comparable to {expected}")]
pub struct KindMismatch {
    /// Position of the offending element.
    pub index: usize,
    /// Kind of the first non-null element.
    pub expected: ValueKind,
    /// Kind of the offending element.
    pub found: ValueKind,
}

/// Remove repeated values, keeping the first occurrence of each.
///
/// Values are equal when they write the same HCL value: the string `"1"` and
/// the number `1` are both kept, while a map and an object with the same
/// fields are one value, since both become an object constructor inside an
/// array. Nulls compare with
/// anything; every other element must fall into the same kind category as
/// the first non-null element.
///
/// # Errors
///
/// Returns [`KindMismatch`] when an element's category differs from the
/// first non-null element's, e.g. a list following a string.
///
/// # Example
///
/// ```rust
/// use tfgen_emitter::dedupe;
/// use tfgen_hcl::Value;
///
/// let values = ["a", "b", "a", "c"].map(Value::from);
/// assert_eq!(dedupe(&values)?, ["a", "b", "c"].map(Value::from));
/// # Ok::<(), tfgen_emitter::KindMismatch>(())
/// ```
pub fn dedupe(values: &[Value]) -> Result<Vec<Value>, KindMismatch> {
    let mut expected: Option<ValueKind> = None;
    let mut deduped: Vec<Value> = Vec::with_capacity(values.len());
    let mut seen: Vec<Value> = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        let kind = value.kind();
        if let Some(category) = kind.category() {
            match expected {
                None => expected = Some(kind),
                Some(first) if first.category() != Some(category) => {
                    return Err(KindMismatch {
                        index,
                        expected: first,
                        found: kind,
                    });
                }
                Some(_) => {}
            }
        }

        let written = as_expression_value(value);
        if !seen.contains(&written) {
            seen.push(written);
            deduped.push(value.clone());
        }
    }

    Ok(deduped)
}

/// The value as it is written in expression position, where objects and maps
/// are indistinguishable.
fn as_expression_value(value: &Value) -> Value {
    match value {
        Value::List(items) => Value::List(items.iter().map(as_expression_value).collect()),
        Value::Map(fields) | Value::Object(fields) => Value::Map(
            fields
                .iter()
                .map(|(key, item)| (key.clone(), as_expression_value(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}
