//! Various types associated with features.

use serde::*;

mod version;
pub use version::Version;

mod matching_rule;
pub use matching_rule::MatchingRule;

/// A unique identifier for features.
///
/// Identity for matching is the `identifier`, compatibility is the `version`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct VersionedIdentifier {
	pub identifier: String,
	pub version: Version,
}

impl VersionedIdentifier {
	pub fn new(identifier: impl Into<String>, version: &str) -> crate::Result<Self> {
		Ok(VersionedIdentifier {
			identifier: identifier.into(),
			version: Version::new(version)?,
		})
	}
}

impl std::cmp::Ord for VersionedIdentifier {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		match self.identifier.cmp(&other.identifier) {
			core::cmp::Ordering::Equal => {}
			ord => return ord,
		}
		self.version.cmp(&other.version)
	}
}

impl std::cmp::PartialOrd for VersionedIdentifier {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for VersionedIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}_{}", self.identifier, self.version)
	}
}

impl AsRef<VersionedIdentifier> for VersionedIdentifier {
	fn as_ref(&self) -> &VersionedIdentifier {
		self
	}
}

/// A lightweight descriptor of a feature before it is dereferenced to the
/// concrete [`Feature`].
///
/// Differs from [`VersionedIdentifier`] in that the matching rule makes it
/// describe a range of acceptable features, of which the referenced version
/// is the minimum.
///
/// This is a plain value type: best-match memoization lives in
/// [`crate::reference_resolver::ReferenceResolver`], not on the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureReference {
	versioned_identifier: VersionedIdentifier,
	matching_rule: MatchingRule,
	optional: bool,
	label: Option<String>,
	/// Where the referenced manifest lives. Distinguishes two references to
	/// the same versioned identifier hosted at different locations.
	url: Option<String>,
}

impl FeatureReference {
	pub fn new(versioned_identifier: VersionedIdentifier, matching_rule: MatchingRule) -> Self {
		FeatureReference {
			versioned_identifier,
			matching_rule,
			optional: false,
			label: None,
			url: None,
		}
	}

	pub fn with_optional(mut self, optional: bool) -> Self {
		self.optional = optional;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	pub fn versioned_identifier(&self) -> &VersionedIdentifier {
		&self.versioned_identifier
	}

	pub fn matching_rule(&self) -> MatchingRule {
		self.matching_rule
	}

	pub fn is_optional(&self) -> bool {
		self.optional
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn url(&self) -> Option<&str> {
		self.url.as_deref()
	}

	/// Does the feature identified by `id` satisfy this reference?
	///
	/// The identifier must match exactly, the version according to the
	/// reference's matching rule.
	pub fn matches(&self, id: &VersionedIdentifier) -> bool {
		if id.identifier != self.versioned_identifier.identifier {
			return false
		}
		self.matching_rule.is_satisfied_by(&id.version, &self.versioned_identifier.version)
	}

	/// A copy of this reference pointing at a concrete `candidate` instead,
	/// keeping the original's matching rule, optional flag and label.
	///
	/// Used by best-match search so the winning reference behaves like the
	/// original while dereferencing to the candidate.
	pub fn retargeted(&self, candidate: &FeatureReference) -> Self {
		FeatureReference {
			versioned_identifier: candidate.versioned_identifier.clone(),
			matching_rule: self.matching_rule,
			optional: self.optional,
			label: self.label.clone(),
			url: candidate.url.clone(),
		}
	}
}

impl std::fmt::Display for FeatureReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.versioned_identifier, self.matching_rule)
	}
}

/// A named, versioned installable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
	pub versioned_identifier: VersionedIdentifier,
	pub label: String,
	pub provider: Option<String>,
	pub description: Option<String>,
	/// Nested features this feature pulls in, to be resolved against the
	/// enabled set like any other reference.
	pub includes: Vec<FeatureReference>,
}

impl std::hash::Hash for Feature {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.versioned_identifier.hash(state);
	}
}

impl AsRef<VersionedIdentifier> for Feature {
	fn as_ref(&self) -> &VersionedIdentifier {
		&self.versioned_identifier
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn reference(id: &str, version: &str, rule: MatchingRule) -> FeatureReference {
		FeatureReference::new(VersionedIdentifier::new(id, version).unwrap(), rule)
	}

	#[test]
	fn reference_ignores_other_identifiers() {
		let r = reference("com.example.feature", "1.2.0", MatchingRule::GreaterOrEqual);
		assert!(!r.matches(&VersionedIdentifier::new("other.feature", "2.0.0").unwrap()));
	}

	#[test]
	fn reference_applies_its_rule() {
		let r = reference("com.example.feature", "1.2.0", MatchingRule::Equivalent);
		assert!(r.matches(&VersionedIdentifier::new("com.example.feature", "1.2.9").unwrap()));
		assert!(!r.matches(&VersionedIdentifier::new("com.example.feature", "1.3.0").unwrap()));
	}

	#[test]
	fn retargeted_keeps_rule_and_label_but_adopts_location() {
		let original = reference("com.example.feature", "1.2.0", MatchingRule::Compatible)
			.with_optional(true)
			.with_label("Example");
		let candidate = reference("com.example.feature", "1.5.0", MatchingRule::Perfect)
			.with_label("ignored")
			.with_url("https://example.com/features/1.5.0");

		let new_ref = original.retargeted(&candidate);
		assert_eq!(new_ref.versioned_identifier(), candidate.versioned_identifier());
		assert_eq!(new_ref.url(), candidate.url());
		assert_eq!(new_ref.matching_rule(), MatchingRule::Compatible);
		assert!(new_ref.is_optional());
		assert_eq!(new_ref.label(), Some("Example"));
	}
}
