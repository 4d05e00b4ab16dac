use serde::*;

/// A structured feature version of the form `major.minor.service.qualifier`.
///
/// Missing components default to `0` (or the empty string for the qualifier),
/// so `"1.2"` reads as `1.2.0`. The numeric components define compatibility,
/// the qualifier only takes part in the total order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
	major: u32,
	minor: u32,
	service: u32,
	qualifier: String,
}

impl Version {
	pub fn new(version: &str) -> crate::Result<Self> {
		fn component(part: Option<&str>, version: &str) -> crate::Result<u32> {
			match part {
				None => Ok(0),
				Some(s) => s.parse::<u32>().map_err(|_|
					crate::Error::Parse(format!("version component `{}` in `{}` is not a number", s, version))
				),
			}
		}

		let mut parts = version.splitn(4, '.');
		Ok(Version {
			major: component(parts.next(), version)?,
			minor: component(parts.next(), version)?,
			service: component(parts.next(), version)?,
			qualifier: parts.next().unwrap_or("").to_string(),
		})
	}

	pub fn major(&self) -> u32 { self.major }
	pub fn minor(&self) -> u32 { self.minor }
	pub fn service(&self) -> u32 { self.service }
	pub fn qualifier(&self) -> &str { &self.qualifier }

	/* Matching predicates, one per matching rule plus the strict order used to pick a best match. */

	/// All four components are equal.
	pub fn is_perfect(&self, base: &Version) -> bool {
		self == base
	}

	/// Same major and minor, at least the base's service level.
	pub fn is_equivalent_to(&self, base: &Version) -> bool {
		self.major == base.major && self.minor == base.minor && self >= base
	}

	/// Same major, at least the base version.
	pub fn is_compatible_with(&self, base: &Version) -> bool {
		self.major == base.major && self >= base
	}

	pub fn is_greater_or_equal_to(&self, base: &Version) -> bool {
		self >= base
	}

	pub fn is_greater_than(&self, base: &Version) -> bool {
		self > base
	}
}

impl TryFrom<&str> for Version {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		(self.major, self.minor, self.service, &self.qualifier)
			.cmp(&(other.major, other.minor, other.service, &other.qualifier))
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.qualifier.is_empty() {
			write!(f, "{}.{}.{}", self.major, self.minor, self.service)
		} else {
			write!(f, "{}.{}.{}.{}", self.major, self.minor, self.service, self.qualifier)
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn v(s: &str) -> Version { Version::new(s).unwrap() }

	#[test] fn version_higher_service_is_gt() { assert!(v("1.2.3") < v("1.2.4")) }
	#[test] fn version_missing_components_are_zero() { assert!(v("1.2") == v("1.2.0")) }
	#[test] fn version_components_are_not_compared_lexically() { assert!(v("1.2.9") < v("1.2.10")) }
	#[test] fn version_qualifier_breaks_ties() { assert!(v("1.2.0.a") < v("1.2.0.b")) }
	#[test] fn version_qualifier_loses_to_service() { assert!(v("1.2.0.z") < v("1.2.1")) }
	#[test] fn version_non_numeric_component_is_rejected() { assert!(Version::new("1.x.0").is_err()) }
	#[test] fn version_empty_string_is_rejected() { assert!(Version::new("").is_err()) }

	#[test] fn perfect_requires_full_equality() { assert!(v("1.2.0").is_perfect(&v("1.2.0")) && !v("1.2.0.a").is_perfect(&v("1.2.0"))) }
	#[test] fn equivalent_allows_higher_service() { assert!(v("1.2.7").is_equivalent_to(&v("1.2.0"))) }
	#[test] fn equivalent_rejects_higher_minor() { assert!(!v("1.3.0").is_equivalent_to(&v("1.2.0"))) }
	#[test] fn equivalent_rejects_lower_service() { assert!(!v("1.2.0").is_equivalent_to(&v("1.2.1"))) }
	#[test] fn compatible_allows_higher_minor() { assert!(v("1.5.0").is_compatible_with(&v("1.2.0"))) }
	#[test] fn compatible_rejects_higher_major() { assert!(!v("2.0.0").is_compatible_with(&v("1.2.0"))) }
	#[test] fn compatible_rejects_lower_version() { assert!(!v("1.1.0").is_compatible_with(&v("1.2.0"))) }
	#[test] fn greater_or_equal_ignores_major() { assert!(v("2.0.0").is_greater_or_equal_to(&v("1.2.0"))) }
}
