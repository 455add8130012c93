//! Descriptors handed to the emitter by upstream tasks.

use crate::error::{Error, Result};
use tfgen_hcl::Value;

/// One infrastructure object to declare.
///
/// The identity of a resource is its type together with its sanitized name;
/// it must be unique across the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Terraform resource type, e.g. `aws_vpc`.
    pub resource_type: String,
    /// Name as given by the caller, before sanitization.
    pub resource_name: String,
    /// Resource body. `Null` produces no block.
    pub item: Value,
}

impl ResourceDescriptor {
    /// Create a new resource descriptor.
    pub fn new(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        item: impl Into<Value>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
            item: item.into(),
        }
    }
}

/// The value of an output variable: a single value or an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputValue {
    /// A single value, written as is.
    Scalar(Value),
    /// An array, de-duplicated before it is written.
    Array(Vec<Value>),
}

/// A named value exposed both as a local and as a Terraform output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputVariable {
    /// Key as given by the caller, before sanitization.
    pub key: String,
    /// The value.
    pub value: OutputValue,
}

impl OutputVariable {
    /// Create a scalar output.
    pub fn scalar(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: OutputValue::Scalar(value.into()),
        }
    }

    /// Create an array output.
    pub fn array<T: Into<Value>>(
        key: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            key: key.into(),
            value: OutputValue::Array(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Build an output from the loose "value or array" form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOutput`] unless exactly one of `value` and
    /// `value_array` is present.
    pub fn from_parts(
        key: impl Into<String>,
        value: Option<Value>,
        value_array: Option<Vec<Value>>,
    ) -> Result<Self> {
        let key = key.into();
        let value = match (value, value_array) {
            (Some(value), None) => OutputValue::Scalar(value),
            (None, Some(values)) => OutputValue::Array(values),
            (Some(_), Some(_)) => {
                return Err(Error::InvalidOutput {
                    key,
                    message: "both value and valueArray are set".to_string(),
                });
            }
            (None, None) => {
                return Err(Error::InvalidOutput {
                    key,
                    message: "neither value nor valueArray is set".to_string(),
                });
            }
        };
        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_scalar() {
        let output =
            OutputVariable::from_parts("vpc_id", Some(Value::from("vpc-1")), None).unwrap();
        assert_eq!(output, OutputVariable::scalar("vpc_id", "vpc-1"));
    }

    #[test]
    fn test_from_parts_array() {
        let output =
            OutputVariable::from_parts("ids", None, Some(vec![Value::from("a")])).unwrap();
        assert_eq!(output, OutputVariable::array("ids", ["a"]));
    }

    #[test]
    fn test_from_parts_rejects_both() {
        let err = OutputVariable::from_parts("k", Some(Value::Null), Some(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidOutput { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_from_parts_rejects_neither() {
        let err = OutputVariable::from_parts("k", None, None).unwrap_err();
        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn test_resource_descriptor_new() {
        let item = Value::object([("cidr_block", "10.0.0.0/16")]);
        let resource = ResourceDescriptor::new("aws_vpc", "main", item);
        assert_eq!(resource.resource_type, "aws_vpc");
        assert_eq!(resource.resource_name, "main");
        assert!(!resource.item.is_null());
    }
}
