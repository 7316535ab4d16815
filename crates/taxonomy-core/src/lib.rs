pub mod catalog;
pub mod config;
pub mod error;

pub use config::{Config, ConfigKey, OutputFormat};
pub use error::{Result, TaxonomyError};

// Catalog pipeline
pub use catalog::{
    derive_id, Catalog, CatalogHandle, CatalogSource, Category, Item, JsonFileSource, Pipeline,
    RefreshObserver, RemoteSource, Subcategory, TaxonomyContext,
};
