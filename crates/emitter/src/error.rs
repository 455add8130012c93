//! Error types for document emission.

use crate::dedupe::KindMismatch;
use miette::Diagnostic;
use tfgen_hcl::EncodeError;
use thiserror::Error;

/// Result type alias using the emitter error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort document generation.
///
/// None of these are recoverable: the input has to be corrected and the
/// generation re-run.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Two resources resolve to the same type and sanitized name.
    #[error(
        "duplicate resource found: {resource_type}.{name} (declared as `{first}` and `{second}`)"
    )]
    #[diagnostic(
        code(tfgen::duplicate_resource),
        help("resource names must stay unique after sanitization; rename one of them")
    )]
    DuplicateResource {
        /// Resource type
        resource_type: String,
        /// Sanitized resource name
        name: String,
        /// Raw name of the first declaration
        first: String,
        /// Raw name of the second declaration
        second: String,
    },

    /// Two output variables resolve to the same sanitized key.
    #[error("duplicate variable found: {name} (declared as `{first}` and `{second}`)")]
    #[diagnostic(
        code(tfgen::duplicate_identifier),
        help("output keys must stay unique after sanitization; rename one of them")
    )]
    DuplicateIdentifier {
        /// Sanitized key
        name: String,
        /// Raw key of the first declaration
        first: String,
        /// Raw key of the second declaration
        second: String,
    },

    /// A value could not be represented in HCL.
    #[error("failed to encode {context}: {source}")]
    #[diagnostic(code(tfgen::encoding))]
    Encoding {
        /// Resource, output or provider being encoded
        context: String,
        /// Underlying encoder error
        #[source]
        source: EncodeError,
    },

    /// An output array mixes values that cannot be compared.
    #[error("output variable `{key}` mixes incomparable values: {source}")]
    #[diagnostic(
        code(tfgen::type_mismatch),
        help("array outputs must hold only scalars, only lists, or only maps")
    )]
    TypeMismatch {
        /// Output key
        key: String,
        /// Offending element
        #[source]
        source: KindMismatch,
    },

    /// An output key was used both as a scalar and as an array.
    #[error("variable `{key}` is both an array and a scalar")]
    #[diagnostic(code(tfgen::output_shape_conflict))]
    OutputShapeConflict {
        /// Output key
        key: String,
    },

    /// An output declaration carries neither or both of value and array.
    #[error("invalid output variable `{key}`: {message}")]
    #[diagnostic(code(tfgen::invalid_output))]
    InvalidOutput {
        /// Output key
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// A data file path was registered twice.
    #[error("duplicate file found: {path}")]
    #[diagnostic(code(tfgen::duplicate_file))]
    DuplicateFile {
        /// Path inside the generated file set
        path: String,
    },

    /// A cloud provider identifier is not known.
    #[error("unknown cloud provider: {name}")]
    #[diagnostic(
        code(tfgen::unknown_cloud_provider),
        help("expected one of: aws, gce, azure, digitalocean, hetzner, openstack, scaleway")
    )]
    UnknownCloudProvider {
        /// The identifier that was given
        name: String,
    },
}
