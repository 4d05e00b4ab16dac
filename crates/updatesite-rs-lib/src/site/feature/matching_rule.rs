use serde::*;
use super::Version;

/// Policy governing which versions of a named feature satisfy a reference.
///
/// Manifests spell these as `perfect`, `equivalent`, `compatible` and
/// `greaterOrEqual`; an absent rule means `Perfect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchingRule {
	/// Only the exact referenced version.
	#[default] Perfect,
	/// Same major and minor, any newer service level.
	Equivalent,
	/// Same major, any newer minor.
	Compatible,
	/// Any version at or above the referenced one.
	GreaterOrEqual,
}

impl MatchingRule {
	pub fn new(rule: &str) -> crate::Result<Self> {
		match rule {
			"perfect" => Ok(MatchingRule::Perfect),
			"equivalent" => Ok(MatchingRule::Equivalent),
			"compatible" => Ok(MatchingRule::Compatible),
			"greaterOrEqual" => Ok(MatchingRule::GreaterOrEqual),
			_ => Err(crate::Error::Parse(format!("unknown matching rule `{}`", rule))),
		}
	}

	/// Does `candidate` satisfy this rule against `base`?
	pub fn is_satisfied_by(&self, candidate: &Version, base: &Version) -> bool {
		match self {
			MatchingRule::Perfect => candidate.is_perfect(base),
			MatchingRule::Equivalent => candidate.is_equivalent_to(base),
			MatchingRule::Compatible => candidate.is_compatible_with(base),
			MatchingRule::GreaterOrEqual => candidate.is_greater_or_equal_to(base),
		}
	}
}

impl TryFrom<&str> for MatchingRule {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl std::fmt::Display for MatchingRule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MatchingRule::Perfect => write!(f, "perfect"),
			MatchingRule::Equivalent => write!(f, "equivalent"),
			MatchingRule::Compatible => write!(f, "compatible"),
			MatchingRule::GreaterOrEqual => write!(f, "greaterOrEqual"),
		}
	}
}
