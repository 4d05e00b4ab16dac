pub mod error;
pub use error::Result;
pub use error::Error;

pub mod site;
pub use site::SiteModel;
pub use site::Feature;

pub mod reference_resolver;
pub use reference_resolver::ReferenceResolver;
