//! The accumulator that upstream tasks fill before a document is assembled.

use crate::error::{Error, Result};
use crate::model::{OutputValue, OutputVariable, ResourceDescriptor};
use crate::provider::{FeatureFlags, ProviderConfig};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tfgen_hcl::{Literal, Value, sanitize};

/// Directory, relative to the document, that holds data files.
const DATA_DIR: &str = "data";

/// Everything needed to emit one Terraform document.
///
/// A context is created fresh for each generation run, populated through the
/// `render_*`/`add_*` methods and consumed once by [`crate::assemble`]. It is
/// not safe to share across threads while it is being populated; callers that
/// collect in parallel merge into a single context first.
#[derive(Debug, Clone)]
pub struct EmissionContext {
    provider: ProviderConfig,
    features: FeatureFlags,
    resources: Vec<ResourceDescriptor>,
    outputs: BTreeMap<String, OutputVariable>,
    files: BTreeMap<String, Vec<u8>>,
}

impl EmissionContext {
    /// Create an empty context for the given provider.
    #[must_use]
    pub const fn new(provider: ProviderConfig) -> Self {
        Self {
            provider,
            features: FeatureFlags { spotinst: false },
            resources: Vec::new(),
            outputs: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Set the feature flags.
    #[must_use]
    pub const fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Provider configuration.
    #[must_use]
    pub const fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Enabled features.
    #[must_use]
    pub const fn features(&self) -> FeatureFlags {
        self.features
    }

    /// Resources in registration order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Output variables keyed by their raw key.
    #[must_use]
    pub const fn outputs(&self) -> &BTreeMap<String, OutputVariable> {
        &self.outputs
    }

    /// Register a resource.
    ///
    /// Duplicates are not rejected here; they surface when the document is
    /// assembled, where the sanitized identity is known for every resource.
    pub fn render_resource(
        &mut self,
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        item: impl Into<Value>,
    ) {
        self.resources
            .push(ResourceDescriptor::new(resource_type, resource_name, item));
    }

    /// Declare a scalar output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if `key` is already declared.
    pub fn add_output_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.add_output(OutputVariable::scalar(key, value))
    }

    /// Append one element to an array output, creating the output on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputShapeConflict`] if `key` is already declared as a
    /// scalar.
    pub fn add_output_variable_array(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.outputs.get_mut(&key) {
            match &mut existing.value {
                OutputValue::Array(values) => values.push(value),
                OutputValue::Scalar(_) => return Err(Error::OutputShapeConflict { key }),
            }
        } else {
            self.outputs.insert(
                key.clone(),
                OutputVariable {
                    key,
                    value: OutputValue::Array(vec![value]),
                },
            );
        }
        Ok(())
    }

    /// Declare a fully-formed output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if an output with the same key is
    /// already declared.
    pub fn add_output(&mut self, output: OutputVariable) -> Result<()> {
        match self.outputs.entry(output.key.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(output);
                Ok(())
            }
            Entry::Occupied(entry) => Err(Error::DuplicateIdentifier {
                name: sanitize(entry.key()),
                first: entry.key().clone(),
                second: output.key,
            }),
        }
    }

    /// Store a data file next to the document and return the expression that
    /// reads it.
    ///
    /// The file lands at `data/<type>_<name>_<key>`, each component sanitized
    /// so the path never leaves the data directory. With `base64`
    /// the reference uses `filebase64()`, which is how binary content such as
    /// compressed user data must be passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFile`] if the path is already stored.
    pub fn add_file_bytes(
        &mut self,
        resource_type: &str,
        resource_name: &str,
        key: &str,
        bytes: impl Into<Vec<u8>>,
        base64: bool,
    ) -> Result<Literal> {
        let path = format!(
            "{DATA_DIR}/{}_{}_{}",
            sanitize(resource_type),
            sanitize(resource_name),
            sanitize(key)
        );
        match self.files.entry(path) {
            Entry::Occupied(entry) => Err(Error::DuplicateFile {
                path: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let literal = Literal::file(entry.key(), base64);
                entry.insert(bytes.into());
                Ok(literal)
            }
        }
    }

    /// Generated file contents by path.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Every generated file, keyed by path.
    #[must_use]
    pub const fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    /// Consume the context and return the generated files.
    #[must_use]
    pub fn into_files(self) -> BTreeMap<String, Vec<u8>> {
        self.files
    }

    pub(crate) fn insert_file(&mut self, name: &str, bytes: Vec<u8>) {
        self.files.insert(name.to_string(), bytes);
    }
}
