//! Package catalog loading, scoping, and labels.

pub mod errors;
pub mod feed;
pub mod models;
pub mod scope;

pub use errors::CatalogError;
pub use feed::CatalogDir;
pub use models::{Country, Package};
pub use scope::{Scope, VolumeBucket};
