//! Cloud providers and their Terraform provider plugins.
//!
//! Each [`CloudProvider`] maps to a [`ProviderSpec`] through a static table:
//! the name of the `provider` block and the `required_providers` entries the
//! document declares. Adding a provider means adding a row, not a branch.

use crate::error::Error;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Cloud providers a document can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CloudProvider {
    /// Amazon Web Services
    Aws,
    /// Google Compute Engine
    Gce,
    /// Microsoft Azure
    Azure,
    /// DigitalOcean
    DigitalOcean,
    /// Hetzner Cloud
    Hetzner,
    /// OpenStack
    OpenStack,
    /// Scaleway
    Scaleway,
}

/// Optional features that add provider plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Spotinst-managed instance groups on AWS.
    Spotinst,
}

/// Enabled optional features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Enables [`Feature::Spotinst`].
    pub spotinst: bool,
}

impl FeatureFlags {
    /// Check whether a feature is enabled.
    #[must_use]
    pub const fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Spotinst => self.spotinst,
        }
    }
}

/// An entry of the `required_providers` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredProvider {
    /// Local name of the provider.
    pub name: &'static str,
    /// Registry source address.
    pub source: &'static str,
    /// Minimum version constraint.
    pub version: &'static str,
    /// Only declared when this feature is enabled.
    pub feature: Option<Feature>,
}

/// How a cloud provider is declared in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSpec {
    /// The cloud provider this row describes.
    pub cloud: CloudProvider,
    /// Name of the `provider` block.
    pub external_name: &'static str,
    /// Plugins to declare in `required_providers`.
    pub required_providers: &'static [RequiredProvider],
}

impl ProviderSpec {
    /// Required providers active under the given feature flags.
    pub fn required_for(&self, features: FeatureFlags) -> impl Iterator<Item = &RequiredProvider> {
        self.required_providers
            .iter()
            .filter(move |p| p.feature.is_none_or(|f| features.enabled(f)))
    }
}

/// Provider table, indexed by `CloudProvider as usize`.
const PROVIDERS: [ProviderSpec; CloudProvider::ALL.len()] = [
    ProviderSpec {
        cloud: CloudProvider::Aws,
        external_name: "aws",
        required_providers: &[
            RequiredProvider {
                name: "aws",
                source: "hashicorp/aws",
                version: ">= 3.34.0",
                feature: None,
            },
            RequiredProvider {
                name: "spotinst",
                source: "spotinst/spotinst",
                version: ">= 1.33.0",
                feature: Some(Feature::Spotinst),
            },
        ],
    },
    ProviderSpec {
        cloud: CloudProvider::Gce,
        external_name: "google",
        required_providers: &[RequiredProvider {
            name: "google",
            source: "hashicorp/google",
            version: ">= 2.19.0",
            feature: None,
        }],
    },
    ProviderSpec {
        cloud: CloudProvider::Azure,
        external_name: "azure",
        required_providers: &[],
    },
    ProviderSpec {
        cloud: CloudProvider::DigitalOcean,
        external_name: "digitalocean",
        required_providers: &[],
    },
    ProviderSpec {
        cloud: CloudProvider::Hetzner,
        external_name: "hetzner",
        required_providers: &[],
    },
    ProviderSpec {
        cloud: CloudProvider::OpenStack,
        external_name: "openstack",
        required_providers: &[],
    },
    ProviderSpec {
        cloud: CloudProvider::Scaleway,
        external_name: "scaleway",
        required_providers: &[],
    },
];

impl CloudProvider {
    /// Every provider, in table order.
    pub const ALL: [Self; 7] = [
        Self::Aws,
        Self::Gce,
        Self::Azure,
        Self::DigitalOcean,
        Self::Hetzner,
        Self::OpenStack,
        Self::Scaleway,
    ];

    /// Internal identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gce => "gce",
            Self::Azure => "azure",
            Self::DigitalOcean => "digitalocean",
            Self::Hetzner => "hetzner",
            Self::OpenStack => "openstack",
            Self::Scaleway => "scaleway",
        }
    }

    /// How this provider is declared in the document.
    #[must_use]
    pub const fn spec(self) -> &'static ProviderSpec {
        &PROVIDERS[self as usize]
    }

    /// Name of the `provider` block.
    #[must_use]
    pub const fn external_name(self) -> &'static str {
        self.spec().external_name
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CloudProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.id() == lowered)
            .ok_or_else(|| Error::UnknownCloudProvider {
                name: s.to_string(),
            })
    }
}

/// Settings for the `provider` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Target cloud.
    pub cloud: CloudProvider,
    /// Region attribute.
    pub region: String,
    /// Extra string attributes, written in key order after the region.
    pub extra_config: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Create a provider configuration with no extra attributes.
    pub fn new(cloud: CloudProvider, region: impl Into<String>) -> Self {
        Self {
            cloud,
            region: region.into(),
            extra_config: BTreeMap::new(),
        }
    }

    /// Add an extra provider attribute.
    #[must_use]
    pub fn with_extra_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_config.insert(key.into(), value.into());
        self
    }
}
