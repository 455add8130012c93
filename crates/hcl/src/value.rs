//! The closed set of value shapes accepted by the encoder.

use crate::literal::Literal;
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

/// JSON key marking a raw expression in [`Value::from_json`].
const LITERAL_KEY: &str = "$literal";
/// JSON key marking an attribute-style map in [`Value::from_json`].
const MAP_KEY: &str = "$map";

/// A typed value to be written into an HCL document.
///
/// Named-field collections come in two flavours that differ only in how the
/// encoder writes them as a field: a [`Value::Map`] becomes an attribute
/// (`tags = { ... }`), a [`Value::Object`] becomes a nested block
/// (`root_block_device { ... }`). Inside expressions both render as object
/// constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(Number),
    /// String scalar.
    String(String),
    /// Raw expression such as a resource reference.
    Literal(Literal),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Named fields written attribute-style.
    Map(BTreeMap<String, Value>),
    /// Named fields written block-style.
    Object(BTreeMap<String, Value>),
}

/// The variant of a [`Value`], used in error messages and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Literal`]
    Literal,
    /// [`Value::List`]
    List,
    /// [`Value::Map`]
    Map,
    /// [`Value::Object`]
    Object,
}

/// Groups of kinds that can be compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    /// Booleans, numbers, strings and literals.
    Scalar,
    /// Lists.
    List,
    /// Maps and objects.
    Collection,
}

impl ValueKind {
    /// The comparison category of this kind, `None` for null.
    ///
    /// Null is comparable with every kind.
    #[must_use]
    pub const fn category(self) -> Option<KindCategory> {
        match self {
            Self::Null => None,
            Self::Bool | Self::Number | Self::String | Self::Literal => {
                Some(KindCategory::Scalar)
            }
            Self::List => Some(KindCategory::List),
            Self::Map | Self::Object => Some(KindCategory::Collection),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Literal => write!(f, "literal"),
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
            Self::Object => write!(f, "object"),
        }
    }
}

impl Value {
    /// Build a list from anything convertible into values.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an attribute-style map.
    pub fn map<K: Into<String>, V: Into<Self>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a block-style object.
    pub fn object<K: Into<String>, V: Into<Self>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The variant of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Literal(_) => ValueKind::Literal,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert untyped JSON.
    ///
    /// JSON objects become [`Value::Object`], except for two markers:
    /// `{"$literal": "<expr>"}` becomes a [`Value::Literal`] and
    /// `{"$map": {...}}` becomes a [`Value::Map`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use tfgen_hcl::{Literal, Value};
    ///
    /// let value = Value::from_json(json!({
    ///     "vpc_id": {"$literal": "aws_vpc.main.id"},
    ///     "tags": {"$map": {"Name": "main"}},
    /// }));
    /// assert_eq!(
    ///     value,
    ///     Value::object([
    ///         ("vpc_id", Value::Literal(Literal::raw("aws_vpc.main.id"))),
    ///         ("tags", Value::map([("Name", "main")])),
    ///     ])
    /// );
    /// ```
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(mut fields) => {
                if fields.len() == 1 {
                    if let Some(serde_json::Value::String(expr)) = fields.get(LITERAL_KEY) {
                        return Self::Literal(Literal::raw(expr.clone()));
                    }
                    if let Some(serde_json::Value::Object(_)) = fields.get(MAP_KEY)
                        && let Some(serde_json::Value::Object(entries)) = fields.remove(MAP_KEY)
                    {
                        return Self::Map(
                            entries
                                .into_iter()
                                .map(|(k, v)| (k, Self::from_json(v)))
                                .collect(),
                        );
                    }
                }
                Self::Object(
                    fields
                        .into_iter()
                        .map(|(k, v)| (k, Self::from_json(v)))
                        .collect(),
                )
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
