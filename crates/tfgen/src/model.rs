//! The declarative model file read by `tfgen generate`.
//!
//! A model lists the provider, resources, outputs and data files of one
//! cluster. It is loaded from JSON, or from YAML when the file extension is
//! `.yaml` or `.yml`, and turned into an [`EmissionContext`].
//!
//! Resource items and output values use the JSON value encoding of
//! [`Value::from_json`]: `{"$literal": "..."}` for raw expressions and
//! `{"$map": {...}}` for attribute-style maps.

use crate::errors::{CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tfgen_emitter::{
    CloudProvider, EmissionContext, FeatureFlags, OutputVariable, ProviderConfig,
    ResourceDescriptor,
};
use tfgen_hcl::{Literal, Value};

/// A parsed model file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelFile {
    /// Provider block settings.
    pub provider: ProviderSection,
    /// Optional features.
    #[serde(default)]
    pub features: FeaturesSection,
    /// Resources to declare.
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    /// Output variables.
    #[serde(default)]
    pub outputs: Vec<OutputEntry>,
    /// Data files stored next to the document.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Provider block settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderSection {
    /// Cloud provider identifier, e.g. `aws` or `gce`.
    pub cloud: String,
    /// Region attribute.
    pub region: String,
    /// Extra string attributes.
    #[serde(default)]
    pub extra_config: BTreeMap<String, String>,
}

/// Optional features.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturesSection {
    /// Declare the Spotinst provider.
    #[serde(default)]
    pub spotinst: bool,
}

/// One resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceEntry {
    /// Terraform resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name, sanitized on emission.
    pub name: String,
    /// Resource body.
    #[serde(default)]
    pub item: serde_json::Value,
}

/// One output variable; exactly one of `value` and `valueArray` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputEntry {
    /// Output key, sanitized on emission.
    pub key: String,
    /// Scalar value.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Array value, de-duplicated on emission.
    #[serde(default)]
    pub value_array: Option<Vec<serde_json::Value>>,
}

/// One data file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileEntry {
    /// Type of the resource the file belongs to.
    pub resource_type: String,
    /// Name of the resource the file belongs to.
    pub resource_name: String,
    /// File key, the last part of the file name.
    pub key: String,
    /// File contents.
    pub content: String,
    /// Reference the file with `filebase64()` instead of `file()`.
    #[serde(default)]
    pub base64: bool,
    /// Resource attribute that receives the file reference.
    #[serde(default)]
    pub attribute: Option<String>,
}

impl ModelFile {
    /// Load a model file, choosing the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CliError::io("reading", path, e))?;
        if is_yaml(path) {
            Self::from_yaml(&content).map_err(|source| CliError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_json(&content).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Parse a JSON model.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed input.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Parse a YAML model.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed input.
    pub fn from_yaml(content: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(content)
    }

    /// Build the emission context described by this model.
    ///
    /// `features` is merged with the model's own feature section; a feature
    /// enabled in either is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown cloud, an invalid or duplicate output,
    /// a duplicate file, or a file whose attribute targets a missing resource.
    pub fn into_context(self, features: FeatureFlags) -> Result<EmissionContext> {
        let cloud: CloudProvider = self.provider.cloud.parse()?;
        let provider = ProviderConfig {
            cloud,
            region: self.provider.region,
            extra_config: self.provider.extra_config,
        };
        let features = FeatureFlags {
            spotinst: features.spotinst || self.features.spotinst,
        };
        let mut ctx = EmissionContext::new(provider).with_features(features);

        let mut resources: Vec<ResourceDescriptor> = self
            .resources
            .into_iter()
            .map(|r| ResourceDescriptor::new(r.resource_type, r.name, Value::from_json(r.item)))
            .collect();

        for file in self.files {
            let literal = ctx.add_file_bytes(
                &file.resource_type,
                &file.resource_name,
                &file.key,
                file.content,
                file.base64,
            )?;
            if let Some(attribute) = file.attribute {
                attach_file(
                    &mut resources,
                    &file.resource_type,
                    &file.resource_name,
                    attribute,
                    literal,
                )?;
            }
        }

        for resource in resources {
            ctx.render_resource(resource.resource_type, resource.resource_name, resource.item);
        }

        for output in self.outputs {
            let value = output.value.map(Value::from_json);
            let value_array = output
                .value_array
                .map(|values| values.into_iter().map(Value::from_json).collect());
            ctx.add_output(OutputVariable::from_parts(output.key, value, value_array)?)?;
        }

        Ok(ctx)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Set `attribute` on the resource identified by type and raw name.
fn attach_file(
    resources: &mut [ResourceDescriptor],
    resource_type: &str,
    resource_name: &str,
    attribute: String,
    literal: Literal,
) -> Result<()> {
    let resource = resources
        .iter_mut()
        .find(|r| r.resource_type == resource_type && r.resource_name == resource_name)
        .ok_or_else(|| {
            CliError::invalid_model_with_help(
                format!("file references unknown resource {resource_type}.{resource_name}"),
                "declare the resource in `resources` or drop the file's `attribute`",
            )
        })?;

    if resource.item.is_null() {
        resource.item = Value::Object(BTreeMap::new());
    }
    match &mut resource.item {
        Value::Object(fields) | Value::Map(fields) => {
            fields.insert(attribute, Value::Literal(literal));
        }
        other => {
            return Err(CliError::invalid_model(format!(
                "resource {resource_type}.{resource_name} has a {} item \
                 and cannot hold attribute `{attribute}`",
                other.kind()
            )));
        }
    }
    Ok(())
}
