//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("feature {0} could not be resolved on the site")]
	Resolution(crate::site::VersionedIdentifier),
}
