//! Functions and methods for reading site types from JSON manifests.

use super::*;
use crate::Error::Parse;

fn get_string(obj: &serde_json::Map<String, serde_json::Value>, key: &str) -> crate::Result<String> {
	obj.get(key)
		.ok_or_else(|| Parse(format!("`{}` field is missing", key)))?
		.as_str()
		.ok_or_else(|| Parse(format!("`{}` field must be a string", key)))
		.map(str::to_string)
}

impl FeatureReference {
	pub fn read_from_json(v: &serde_json::Value) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("feature reference must be an object".to_string()))?;

		let mut reference = FeatureReference::new(
			VersionedIdentifier::new(get_string(obj, "identifier")?, &get_string(obj, "version")?)?,
			{
				if let Some(m) = obj.get("match") {
					MatchingRule::new(m.as_str().ok_or_else(|| Parse("`match` field must be a string".to_string()))?)?
				} else {
					MatchingRule::default()
				}
			},
		);

		if let Some(o) = obj.get("optional") {
			reference = reference.with_optional(o.as_bool().ok_or_else(|| Parse("`optional` field must be a bool".to_string()))?);
		}
		if obj.get("label").is_some() {
			reference = reference.with_label(get_string(obj, "label")?);
		}
		if obj.get("url").is_some() {
			reference = reference.with_url(get_string(obj, "url")?);
		}

		Ok(reference)
	}
}

impl Feature {
	pub fn read_from_json(v: &serde_json::Value) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("feature must be an object".to_string()))?;

		Ok(Feature {
			versioned_identifier: VersionedIdentifier::new(get_string(obj, "identifier")?, &get_string(obj, "version")?)?,
			label: get_string(obj, "label")?,
			provider: {
				if obj.get("provider").is_some() { Some(get_string(obj, "provider")?) } else { None }
			},
			description: {
				if obj.get("description").is_some() { Some(get_string(obj, "description")?) } else { None }
			},
			includes: {
				let mut includes = Vec::<FeatureReference>::new();
				if let Some(v) = obj.get("includes") {
					let arr = v.as_array().ok_or_else(|| Parse("`includes` field must be an array".to_string()))?;
					for elem in arr {
						includes.push(FeatureReference::read_from_json(elem)?);
					}
				}
				includes
			},
		})
	}
}

impl SiteModel {
	pub fn read_from_json(v: &serde_json::Value) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("site manifest must be an object".to_string()))?;

		Ok(SiteModel {
			features: {
				let arr = obj.get("features")
					.ok_or_else(|| Parse("`features` field is missing".to_string()))?
					.as_array()
					.ok_or_else(|| Parse("`features` field must be an array".to_string()))?;
				let mut features = Vec::<Feature>::new();
				for elem in arr {
					features.push(Feature::read_from_json(elem)?);
				}
				features
			},
			configuration: {
				match obj.get("configured") {
					None => None,
					Some(v) => {
						let arr = v.as_array().ok_or_else(|| Parse("`configured` field must be an array".to_string()))?;
						/* Unreadable entries stay in the list as `None` so the
						 * rest of the configuration remains usable. */
						let enabled = arr.iter().enumerate().map(|(i, elem)| {
							if elem.is_null() {
								return None
							}
							match FeatureReference::read_from_json(elem) {
								Ok(r) => Some(r),
								Err(e) => {
									log::warn!("Couldn't read configured entry {}: {}", i, e);
									None
								},
							}
						}).collect();
						Some(SiteConfiguration { enabled })
					}
				}
			},
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn reference_defaults_to_perfect_match() {
		let v = serde_json::json!({ "identifier": "com.example.feature", "version": "1.2.0" });
		let r = FeatureReference::read_from_json(&v).unwrap();
		assert_eq!(r.matching_rule(), MatchingRule::Perfect);
		assert!(!r.is_optional());
	}

	#[test]
	fn reference_with_bad_rule_is_rejected() {
		let v = serde_json::json!({ "identifier": "a", "version": "1.0.0", "match": "sideways" });
		assert!(FeatureReference::read_from_json(&v).is_err());
	}

	#[test]
	fn unreadable_configured_entries_become_none() {
		let v = serde_json::json!({
			"features": [],
			"configured": [
				{ "identifier": "a", "version": "1.0.0" },
				null,
				{ "identifier": "b", "version": "not a version" },
			]
		});
		let site = SiteModel::read_from_json(&v).unwrap();
		let configured = site.current_configured_site().unwrap().configured_features();
		assert_eq!(configured.len(), 3);
		assert!(configured[0].is_some());
		assert!(configured[1].is_none());
		assert!(configured[2].is_none());
	}

	#[test]
	fn feature_includes_are_read() {
		let v = serde_json::json!({
			"identifier": "com.example.parent", "version": "2.0.0", "label": "Parent",
			"includes": [
				{ "identifier": "com.example.child", "version": "1.2.0", "match": "compatible", "optional": true },
			]
		});
		let f = Feature::read_from_json(&v).unwrap();
		assert_eq!(f.includes.len(), 1);
		assert_eq!(f.includes[0].matching_rule(), MatchingRule::Compatible);
		assert!(f.includes[0].is_optional());
	}
}
