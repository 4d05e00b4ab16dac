//! Various helper functions for testing

/// Gets a small site model for use in testing, loaded through the JSON
/// manifest importer.
///
/// The site hosts `com.example.feature` at `1.2.0` and `1.5.0`,
/// `other.feature` at `2.0.0` and a `com.example.platform` feature including
/// `com.example.feature`. Everything except the platform feature is enabled,
/// and the configuration contains one unreadable (null) entry.
pub fn get_sample_site() -> updatesite_rs::SiteModel {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let path = dir.path().join("site.json");
	std::fs::write(&path, include_str!("sample-site.json")).expect("failed to write site manifest");
	updatesite_rs::SiteModel::load(&path).expect("failed to load site manifest")
}
