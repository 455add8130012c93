//! Encoding of [`Value`]s into HCL structures and expressions.
//!
//! A field is written block-style when its value is a [`Value::Object`] (or a
//! list made only of objects, which becomes repeated blocks) and
//! attribute-style otherwise. Null values and empty collections are left out
//! entirely; callers that need a literal `[]` or `{}` build the attribute
//! themselves.
//!
//! The structures produced here are plain [`hcl`] types, so the final text
//! comes from the `hcl` formatter via [`render`].

use crate::ident::identifier;
use crate::literal::Literal;
use crate::value::{Value, ValueKind};
use hcl::{Attribute, Block, BlockLabel, Body, Expression, Identifier, ObjectKey, Structure};
use std::collections::BTreeMap;

/// Attribute name used when parsing literal expression text.
const LITERAL_ATTRIBUTE: &str = "literal";

/// Errors raised when a value has no representation in HCL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A list mixes element kinds that HCL cannot hold in one collection.
    #[error("list at `{path}` mixes {expected} and {found} elements")]
    HeterogeneousList {
        /// Path of the offending element.
        path: String,
        /// Kind of the first non-null element.
        expected: ValueKind,
        /// Kind of the offending element.
        found: ValueKind,
    },

    /// A field name cannot be written as an attribute or block name.
    #[error("field `{name}` at `{path}` is not a valid identifier")]
    InvalidName {
        /// Path of the field.
        path: String,
        /// The field name.
        name: String,
    },

    /// A resource item is not a named-field collection.
    #[error("expected a named-field collection, found {found}")]
    UnsupportedItem {
        /// Kind of the value that was provided.
        found: ValueKind,
    },

    /// A literal is not exactly one HCL expression.
    #[error("literal `{expr}` at `{path}` is not a valid expression: {message}")]
    InvalidLiteral {
        /// Path of the literal.
        path: String,
        /// The literal text.
        expr: String,
        /// Why it was rejected.
        message: String,
    },

    /// The formatter could not write the document.
    #[error("failed to format document: {message}")]
    Format {
        /// The formatter's error message.
        message: String,
    },
}

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Encode every field of a named-field collection, in key order.
///
/// # Errors
///
/// Returns an error if any field fails to encode.
pub fn encode_fields(fields: &BTreeMap<String, Value>) -> Result<Vec<Structure>> {
    fields_at(fields, "")
}

/// Encode a single named field.
///
/// Yields nothing for null and empty values, one attribute or block for most
/// values, and one block per element for a list of objects.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidName`] if `name` (or a nested block field
/// name) is not a legal identifier, and [`EncodeError::HeterogeneousList`] if
/// a list mixes incompatible element kinds.
pub fn encode_field(name: &str, value: &Value) -> Result<Vec<Structure>> {
    field_at(name, value, name)
}

/// Encode a value as an expression.
///
/// Both maps and objects become object constructors here, since blocks cannot
/// appear inside expressions.
///
/// # Errors
///
/// Returns [`EncodeError::HeterogeneousList`] if a list mixes incompatible
/// element kinds and [`EncodeError::InvalidLiteral`] if a literal does not
/// parse.
pub fn expression(value: &Value) -> Result<Expression> {
    expression_at(value, "")
}

/// Build a block from its identifier, labels and body structures.
pub fn block<L>(
    identifier: impl Into<Identifier>,
    labels: impl IntoIterator<Item = L>,
    structures: impl IntoIterator<Item = Structure>,
) -> Block
where
    L: Into<BlockLabel>,
{
    Block::builder(identifier)
        .add_labels(labels)
        .add_structures(structures)
        .build()
}

/// Format a body as HCL text.
///
/// # Errors
///
/// Returns [`EncodeError::Format`] if the formatter fails.
pub fn render(body: &Body) -> Result<String> {
    hcl::format::to_string(body).map_err(|err| EncodeError::Format {
        message: err.to_string(),
    })
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn fields_at(fields: &BTreeMap<String, Value>, path: &str) -> Result<Vec<Structure>> {
    let mut structures = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        structures.extend(field_at(name, value, &join_path(path, name))?);
    }
    Ok(structures)
}

fn field_at(name: &str, value: &Value, path: &str) -> Result<Vec<Structure>> {
    match value {
        Value::Null => return Ok(Vec::new()),
        Value::List(items) if items.is_empty() => return Ok(Vec::new()),
        Value::Map(fields) | Value::Object(fields) if fields.is_empty() => return Ok(Vec::new()),
        _ => {}
    }

    let ident = identifier(name).ok_or_else(|| EncodeError::InvalidName {
        path: path.to_string(),
        name: name.to_string(),
    })?;

    match value {
        Value::Object(fields) => {
            let inner = fields_at(fields, path)?;
            Ok(vec![Structure::Block(block(ident, no_labels(), inner))])
        }
        Value::List(items) if items.iter().all(|i| matches!(i, Value::Object(_))) => {
            let mut blocks = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                if let Value::Object(fields) = item {
                    let inner = fields_at(fields, &format!("{path}[{idx}]"))?;
                    blocks.push(Structure::Block(block(ident.clone(), no_labels(), inner)));
                }
            }
            Ok(blocks)
        }
        _ => {
            let expr = expression_at(value, path)?;
            Ok(vec![Structure::Attribute(Attribute::new(ident, expr))])
        }
    }
}

fn no_labels() -> std::iter::Empty<BlockLabel> {
    std::iter::empty()
}

fn expression_at(value: &Value, path: &str) -> Result<Expression> {
    Ok(match value {
        Value::Null => Expression::Null,
        Value::Bool(b) => Expression::Bool(*b),
        Value::Number(n) => number(n),
        Value::String(s) => Expression::String(s.clone()),
        Value::Literal(literal) => literal_expression(literal, path)?,
        Value::List(items) => {
            check_uniform(items, path)?;
            Expression::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| expression_at(item, &format!("{path}[{idx}]")))
                    .collect::<Result<_>>()?,
            )
        }
        Value::Map(fields) | Value::Object(fields) => Expression::Object(
            fields
                .iter()
                .map(|(key, item)| -> Result<(ObjectKey, Expression)> {
                    let expr = expression_at(item, &join_path(path, key))?;
                    Ok((object_key(key), expr))
                })
                .collect::<Result<hcl::Object<_, _>>>()?,
        ),
    })
}

fn number(n: &serde_json::Number) -> Expression {
    if let Some(i) = n.as_i64() {
        Expression::Number(hcl::Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Expression::Number(hcl::Number::from(u))
    } else {
        n.as_f64()
            .and_then(hcl::Number::from_f64)
            .map_or(Expression::Null, Expression::Number)
    }
}

/// Bare keys where the name allows it, quoted keys otherwise.
fn object_key(key: &str) -> ObjectKey {
    identifier(key).map_or_else(
        || ObjectKey::Expression(Expression::String(key.to_string())),
        ObjectKey::Identifier,
    )
}

/// Parse literal text into the expression it denotes.
fn literal_expression(literal: &Literal, path: &str) -> Result<Expression> {
    let invalid = |message: String| EncodeError::InvalidLiteral {
        path: path.to_string(),
        expr: literal.to_string(),
        message,
    };
    let body = hcl::parse(&format!("{LITERAL_ATTRIBUTE} = {literal}\n"))
        .map_err(|err| invalid(err.to_string()))?;
    let mut structures = body.into_iter();
    match (structures.next(), structures.next()) {
        (Some(Structure::Attribute(attr)), None) => Ok(attr.expr),
        _ => Err(invalid("expected a single expression".to_string())),
    }
}

/// Check that all non-null list elements share one kind category.
fn check_uniform(items: &[Value], path: &str) -> Result<()> {
    let mut expected: Option<ValueKind> = None;
    for (idx, item) in items.iter().enumerate() {
        let kind = item.kind();
        let Some(category) = kind.category() else {
            continue;
        };
        match expected {
            None => expected = Some(kind),
            Some(first) if first.category() != Some(category) => {
                return Err(EncodeError::HeterogeneousList {
                    path: format!("{path}[{idx}]"),
                    expected: first,
                    found: kind,
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: Value) -> String {
        match fields {
            Value::Object(fields) => {
                let body = Body::builder().add_structures(encode_fields(&fields).unwrap());
                render(&body.build()).unwrap()
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    /// Compare two documents structurally, ignoring layout.
    fn assert_hcl_eq(actual: &str, expected: &str) {
        assert_eq!(
            hcl::parse(actual).unwrap(),
            hcl::parse(expected).unwrap(),
            "rendered:\n{actual}"
        );
    }

    #[test]
    fn test_scalars_become_attributes() {
        let out = encode(Value::object([
            ("size", Value::from(3)),
            ("name", Value::from("x")),
            ("enabled", Value::from(true)),
        ]));
        assert_hcl_eq(&out, "enabled = true\nname = \"x\"\nsize = 3\n");
        assert!(out.find("enabled") < out.find("name"));
        assert!(out.find("name") < out.find("size"));
    }

    #[test]
    fn test_null_and_empty_are_omitted() {
        let out = encode(Value::object([
            ("a", Value::Null),
            ("b", Value::List(Vec::new())),
            ("c", Value::Map(BTreeMap::new())),
            ("d", Value::Object(BTreeMap::new())),
            ("e", Value::from(1)),
        ]));
        assert_eq!(out, "e = 1\n");
    }

    #[test]
    fn test_object_becomes_nested_block() {
        let out = encode(Value::object([(
            "root_block_device",
            Value::object([("volume_size", Value::from(20)), ("volume_type", Value::from("gp3"))]),
        )]));
        assert_hcl_eq(
            &out,
            "root_block_device {\n  volume_size = 20\n  volume_type = \"gp3\"\n}\n",
        );
    }

    #[test]
    fn test_list_of_objects_becomes_repeated_blocks() {
        let fields = match Value::object([(
            "ingress",
            Value::List(vec![
                Value::object([("from_port", 22)]),
                Value::object([("from_port", 443)]),
            ]),
        )]) {
            Value::Object(fields) => fields,
            _ => unreachable!(),
        };
        let structures = encode_fields(&fields).unwrap();
        assert!(structures.iter().all(|s| matches!(s, Structure::Block(_))));
        assert_eq!(structures.len(), 2);
        let body = Body::builder().add_structures(structures).build();
        assert_hcl_eq(
            &render(&body).unwrap(),
            "ingress {\n  from_port = 22\n}\ningress {\n  from_port = 443\n}\n",
        );
    }

    #[test]
    fn test_map_becomes_attribute() {
        let out = encode(Value::object([(
            "tags",
            Value::map([("Name", "nodes"), ("KubernetesCluster", "example.com")]),
        )]));
        assert_hcl_eq(
            &out,
            "tags = {\n  KubernetesCluster = \"example.com\"\n  Name = \"nodes\"\n}\n",
        );
    }

    #[test]
    fn test_literal_is_written_verbatim() {
        let out = encode(Value::object([(
            "vpc_id",
            Value::Literal(Literal::property("aws_vpc", "main", "id")),
        )]));
        assert_eq!(out, "vpc_id = aws_vpc.main.id\n");
    }

    #[test]
    fn test_file_literal_round_trips() {
        let literal = Literal::file("data/aws_iam_role_masters_policy", false);
        let out = encode(Value::object([("policy", Value::Literal(literal.clone()))]));
        assert_eq!(out, format!("policy = {literal}\n"));
    }

    #[test]
    fn test_invalid_literal_fails() {
        let err = expression(&Value::Literal(Literal::raw("aws_vpc.main.id\nextra = 1")))
            .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidLiteral { .. }));

        let err = expression(&Value::Literal(Literal::raw("file(\""))).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidLiteral { ref path, .. } if path.is_empty()));
    }

    #[test]
    fn test_list_preserves_order() {
        let expr = expression(&Value::list(["c", "a", "b"])).unwrap();
        assert_eq!(
            expr,
            Expression::Array(vec!["c".into(), "a".into(), "b".into()])
        );
    }

    #[test]
    fn test_literals_mix_with_strings() {
        let value = Value::List(vec![
            Value::from("sg-123"),
            Value::Literal(Literal::property("aws_security_group", "nodes", "id")),
        ]);
        assert!(expression(&value).is_ok());
    }

    #[test]
    fn test_heterogeneous_list_fails() {
        let value = Value::List(vec![Value::from("a"), Value::list(["b"])]);
        let err = encode_field("mixed", &value).unwrap_err();
        assert_eq!(
            err,
            EncodeError::HeterogeneousList {
                path: "mixed[1]".to_string(),
                expected: ValueKind::String,
                found: ValueKind::List,
            }
        );
    }

    #[test]
    fn test_nulls_fit_any_list() {
        let value = Value::List(vec![Value::Null, Value::from(1), Value::Null]);
        assert!(expression(&value).is_ok());
    }

    #[test]
    fn test_mixed_objects_and_scalars_fail() {
        let value = Value::List(vec![Value::object([("a", 1)]), Value::from(2)]);
        assert!(matches!(
            encode_field("x", &value),
            Err(EncodeError::HeterogeneousList { .. })
        ));
    }

    #[test]
    fn test_invalid_field_name() {
        let value = Value::object([("spec", Value::object([("bad name", 1)]))]);
        let err = encode_field("outer", &value).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidName {
                path: "outer.spec.bad name".to_string(),
                name: "bad name".to_string(),
            }
        );
    }

    #[test]
    fn test_map_keys_are_quoted_when_needed() {
        let expr = expression(&Value::map([("kubernetes.io/role/elb", "1")])).unwrap();
        let Expression::Object(object) = expr else {
            panic!("expected an object, got {expr:?}");
        };
        let keys: Vec<_> = object.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![ObjectKey::Expression(Expression::String(
                "kubernetes.io/role/elb".to_string()
            ))]
        );
    }

    #[test]
    fn test_object_in_expression_context() {
        let value = Value::List(vec![Value::object([("a", 1)]), Value::map([("b", 2)])]);
        let expr = expression(&value).unwrap();
        assert!(matches!(expr, Expression::Array(ref items) if items.len() == 2));
    }

    #[test]
    fn test_block_labels() {
        let block = block("resource", ["widget", "main"], Vec::new());
        let body = Body::builder().add_block(block).build();
        assert_hcl_eq(&render(&body).unwrap(), "resource \"widget\" \"main\" {}\n");
    }

    #[test]
    fn test_error_messages() {
        let err = EncodeError::UnsupportedItem {
            found: ValueKind::List,
        };
        assert_eq!(err.to_string(), "expected a named-field collection, found list");
    }
}
