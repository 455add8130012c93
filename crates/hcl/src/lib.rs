//! HCL building blocks for tfgen.
//!
//! This crate turns typed values into Terraform-flavoured HCL. The document
//! tree and the printer come from the [`hcl`] crate; what lives here is the
//! mapping onto it:
//!
//! - [`Value`]: the closed set of value shapes upstream code can hand over
//! - [`encode`]: maps values onto attributes, nested blocks and expressions,
//!   and renders a finished [`Body`]
//! - [`sanitize`]: turns arbitrary names into legal identifiers
//! - [`Literal`]: raw expressions such as resource references
//!
//! # Example
//!
//! ```rust
//! use tfgen_hcl::{Body, Value, encode};
//!
//! let fields = encode::encode_field("size", &Value::from(3)).unwrap();
//! let resource = encode::block(
//!     "resource",
//!     ["widget".to_string(), tfgen_hcl::sanitize("My Widget!")],
//!     fields,
//! );
//! let root = Body::builder().add_block(resource).build();
//!
//! assert_eq!(
//!     encode::render(&root).unwrap(),
//!     "resource \"widget\" \"My_Widget_\" {\n  size = 3\n}\n"
//! );
//! ```

#![warn(missing_docs)]

pub mod encode;
mod ident;
mod literal;
mod value;

pub use encode::EncodeError;
pub use hcl::{Attribute, Block, BlockLabel, Body, Expression, Identifier, ObjectKey, Structure};
pub use ident::{is_valid_identifier, sanitize};
pub use literal::Literal;
pub use value::{KindCategory, Value, ValueKind};
