pub mod core;
pub mod export;
pub mod parser;
pub mod pipeline;

pub use crate::core::catalog::{Catalog, CatalogStats};
pub use crate::core::model::{ContentSummary, FilenameMetadata, Make, PriceListRecord};
