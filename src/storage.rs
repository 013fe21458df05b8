pub mod catalog;
mod seed;

pub use catalog::{Catalog, CatalogError};
pub use seed::SeedError;
