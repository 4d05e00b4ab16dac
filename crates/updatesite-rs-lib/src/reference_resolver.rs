//! Utilities for resolving a [`FeatureReference`] to the concrete [`Feature`] satisfying it.
//!
//! # Usage
//! 1. Create a [`ReferenceResolver`].
//! 1. Call [`ReferenceResolver::resolve()`] with the site owning the reference;
//! repeat queries for the same reference are answered from the resolver's cache.
//! 1. Call [`ReferenceResolver::invalidate()`] (or [`ReferenceResolver::invalidate_all()`])
//! whenever the enabled feature set changes, otherwise cached results go stale.
//!
//! The resolver holds no synchronization of its own; callers sharing one
//! across threads must serialize access externally.

use std::collections::HashMap;
use std::rc::Rc;

use crate::site::*;

/// Searches `configured_site` for the highest enabled version satisfying `reference`.
///
/// Candidates are taken in site enumeration order, unreadable (`None`) entries
/// are skipped, and a candidate is adopted only when strictly greater than the
/// current best, so the first of equal versions wins. The returned reference
/// carries the original's matching rule, optional flag and label while
/// pointing at the winning candidate.
///
/// `None` means nothing enabled satisfies the reference.
pub fn best_match(reference: &FeatureReference, configured_site: &dyn ConfiguredSite) -> Option<FeatureReference> {
	let mut best: Option<&FeatureReference> = None;

	for candidate in configured_site.configured_features().iter().flatten() {
		let id = candidate.versioned_identifier();
		if !reference.matches(id) {
			continue
		}
		match best {
			Some(b) if !id.version.is_greater_than(&b.versioned_identifier().version) => {},
			_ => best = Some(candidate),
		}
	}

	best.map(|b| {
		log::debug!("Found best match feature {} for reference {}", b, reference);
		reference.retargeted(b)
	})
}

/// Resolves feature references against a site, memoizing one best-match
/// result per reference.
///
/// The cache is keyed by reference value and is never invalidated implicitly:
/// once a reference resolves, later calls return the identical object even if
/// the site's enabled set has changed since. The owner of the enabled set is
/// expected to call [`ReferenceResolver::invalidate()`] when it mutates it.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
	best_matches: HashMap<FeatureReference, Rc<Feature>>,
}

impl ReferenceResolver {
	pub fn new() -> Self {
		Default::default()
	}

	/// Resolves `reference` to a concrete feature hosted by `site`.
	///
	/// With `exact_match` set, or when the reference's matching rule is
	/// [`MatchingRule::Perfect`], the reference is dereferenced directly and
	/// no search takes place. Otherwise the enabled features of
	/// `configured_site` (or, when `None`, of the site's current configured
	/// site) are searched with [`best_match`] and the result cached. Without
	/// any configured site to search there is nothing to match against and
	/// the original reference is dereferenced as-is; that is a normal
	/// outcome, not an error.
	///
	/// Fails with [`crate::Error::Resolution`] when dereferencing the chosen
	/// reference fails; the failure is not cached, so a later call retries.
	///
	/// There is no notion of a disabled reference here: a feature is taken
	/// out of play by removing it from the configuration
	/// (see [`crate::SiteModel::unconfigure`]).
	pub fn resolve(
		&mut self,
		site: &dyn Site,
		reference: &FeatureReference,
		exact_match: bool,
		configured_site: Option<&dyn ConfiguredSite>,
	) -> crate::Result<Rc<Feature>> {
		/* A perfect rule leaves nothing to search for. */
		if exact_match || reference.matching_rule() == MatchingRule::Perfect {
			return Ok(Rc::new(site.get_feature(reference)?));
		}

		if let Some(feature) = self.best_matches.get(reference) {
			return Ok(Rc::clone(feature));
		}

		let best = match configured_site.or_else(|| site.current_configured_site()) {
			Some(c) => best_match(reference, c),
			None => {
				log::trace!("No configured site for reference {}, dereferencing directly", reference);
				None
			},
		};

		let feature = Rc::new(match best {
			Some(best) => site.get_feature(&best)?,
			None => site.get_feature(reference)?,
		});
		self.best_matches.insert(reference.clone(), Rc::clone(&feature));
		Ok(feature)
	}

	/// Drops the cached result for `reference` so the next resolve searches again.
	pub fn invalidate(&mut self, reference: &FeatureReference) {
		log::trace!("Invalidating cached resolution for reference {}", reference);
		self.best_matches.remove(reference);
	}

	pub fn invalidate_all(&mut self) {
		log::trace!("Invalidating all cached resolutions");
		self.best_matches.clear();
	}
}

#[cfg(test)]
mod test {
	use super::*;

	struct Enabled(Vec<Option<FeatureReference>>);

	impl ConfiguredSite for Enabled {
		fn configured_features(&self) -> &[Option<FeatureReference>] {
			&self.0
		}
	}

	fn reference(id: &str, version: &str, rule: MatchingRule) -> FeatureReference {
		FeatureReference::new(VersionedIdentifier::new(id, version).unwrap(), rule)
	}

	#[test]
	fn best_match_skips_unreadable_entries() {
		let enabled = Enabled(vec![
			None,
			Some(reference("com.example.feature", "1.4.0", MatchingRule::Perfect)),
			None,
		]);
		let base = reference("com.example.feature", "1.2.0", MatchingRule::Compatible);
		let best = best_match(&base, &enabled).unwrap();
		assert_eq!(best.versioned_identifier(), &VersionedIdentifier::new("com.example.feature", "1.4.0").unwrap());
	}

	#[test]
	fn best_match_keeps_first_of_equal_versions() {
		let enabled = Enabled(vec![
			Some(reference("com.example.feature", "1.4.0", MatchingRule::Perfect).with_url("https://a.example.com")),
			Some(reference("com.example.feature", "1.4.0", MatchingRule::Perfect).with_url("https://b.example.com")),
		]);
		let base = reference("com.example.feature", "1.2.0", MatchingRule::Compatible);
		let best = best_match(&base, &enabled).unwrap();
		assert_eq!(best.url(), Some("https://a.example.com"));
	}

	#[test]
	fn best_match_is_none_when_nothing_satisfies() {
		let enabled = Enabled(vec![
			Some(reference("com.example.feature", "2.0.0", MatchingRule::Perfect)),
			Some(reference("other.feature", "1.2.0", MatchingRule::Perfect)),
		]);
		let base = reference("com.example.feature", "1.2.0", MatchingRule::Compatible);
		assert!(best_match(&base, &enabled).is_none());
	}
}
