pub mod catalog;
pub mod store;

pub use catalog::{Catalog, CatalogDocument, Masters, PaintData, TagData};
pub use store::CatalogStore;
