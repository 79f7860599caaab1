// lecatalogue - Assessment Catalog
//
// *Le Catalogue* (The Catalog) - Immutable assessment records and their loaders

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod catalog;
pub mod derive;

pub use catalog::{fingerprint, Catalog, CatalogItem, Error, Result};
pub use derive::{describe, name_from_url};
