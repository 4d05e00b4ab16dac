//! # The update site model
//!
//! A site hosts concrete [`Feature`]s; a [`ConfiguredSite`] is the subset of
//! them currently enabled. References into a site are resolved by
//! [`crate::reference_resolver`].

use serde::*;

mod feature;
pub use feature::Version;
pub use feature::MatchingRule;
pub use feature::VersionedIdentifier;
pub use feature::FeatureReference;
pub use feature::Feature;

mod import;

/// A location features can be installed from.
pub trait Site {
	/// Dereferences `reference` to its concrete feature.
	///
	/// Fails with [`crate::Error::Resolution`] when the site hosts nothing
	/// under the referenced versioned identifier.
	fn get_feature(&self, reference: &FeatureReference) -> crate::Result<Feature>;

	/// The currently enabled subset of this site, `None` when the site is
	/// not part of any configuration.
	fn current_configured_site(&self) -> Option<&dyn ConfiguredSite>;
}

/// The subset of a site's features which is currently enabled.
pub trait ConfiguredSite {
	/// Enabled feature references in site enumeration order.
	///
	/// Entries are `None` when the underlying manifest could not be read;
	/// callers are expected to skip them.
	fn configured_features(&self) -> &[Option<FeatureReference>];
}

/// The enabled subset of a [`SiteModel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfiguration {
	enabled: Vec<Option<FeatureReference>>,
}

impl ConfiguredSite for SiteConfiguration {
	fn configured_features(&self) -> &[Option<FeatureReference>] {
		&self.enabled
	}
}

/// An in-memory update site: the hosted features plus, optionally, the
/// configuration tracking which of them are enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteModel {
	features: Vec<Feature>,
	configuration: Option<SiteConfiguration>,
}

impl SiteModel {
	/// Reads a site from a JSON manifest file.
	pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let data = std::fs::read(path)?;
		Self::read_from_json(&serde_json::from_slice::<serde_json::Value>(&data)?)
	}

	pub fn features(&self) -> &[Feature] {
		&self.features
	}

	pub fn add_feature(&mut self, feature: Feature) {
		self.features.push(feature);
	}

	/// Enables a feature by reference, creating the configuration on first use.
	pub fn configure(&mut self, reference: FeatureReference) {
		log::trace!("Configuring feature {} on site", reference);
		self.configuration.get_or_insert_with(Default::default).enabled.push(Some(reference));
	}

	/// Disables every enabled reference carrying `identifier`.
	pub fn unconfigure(&mut self, identifier: &VersionedIdentifier) {
		log::trace!("Unconfiguring feature {} on site", identifier);
		if let Some(configuration) = &mut self.configuration {
			configuration.enabled.retain(|r| {
				match r {
					Some(r) => r.versioned_identifier() != identifier,
					None => true,
				}
			});
		}
	}
}

impl Site for SiteModel {
	fn get_feature(&self, reference: &FeatureReference) -> crate::Result<Feature> {
		self.features.iter()
			.find(|f| &f.versioned_identifier == reference.versioned_identifier())
			.cloned()
			.ok_or_else(|| crate::Error::Resolution(reference.versioned_identifier().clone()))
	}

	fn current_configured_site(&self) -> Option<&dyn ConfiguredSite> {
		self.configuration.as_ref().map(|c| c as &dyn ConfiguredSite)
	}
}
