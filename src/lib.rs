//! # Pigment
//!
//! Search service for a paint catalog: faceted filtering with tag-category
//! semantics, natural ordering of model numbers and CIEDE2000 color matching.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! pigment --catalog ./data/catalog.sample.json --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use pigment::prelude::*;
//!
//! let red = RgbColor::from_u8(255, 0, 0);
//! let orange_red = hex_to_rgb("#FF1100").unwrap();
//! assert!(ciede2000(orange_red, red) < 1.0);
//! ```
//!
//! ## Crate Structure
//!
//! - `pigment-core` - Color values, model numbers, criteria, filters and the query planner
//! - `pigment-similarity` - CIEDE2000 distance and similarity ranking
//! - `pigment-storage` - Catalog snapshot loading and reload
//! - `pigment-api` - Query service and REST API

// Re-export core types
pub use pigment_core::{
    hex_to_hsl, hex_to_rgb, planner, CatalogFilter, CatalogRecord, ColorSpec, Error, Filter,
    FilterCondition, HexColor, HslColor, ModelNumber, Page, Result, RgbColor, SearchCriteria,
    SimilarityQuery, SortOption, Tag, TagIndex, TagRef,
};

// Re-export similarity
pub use pigment_similarity::{ciede2000, rank, Lab, RankedRecord, MAX_RESULT_WINDOW};

// Re-export storage
pub use pigment_storage::{Catalog, CatalogStore};

// Re-export API
pub use pigment_api::{ColorSearchRequest, PaintService, RestApi, SearchRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ciede2000, hex_to_hsl, hex_to_rgb, rank, Catalog, CatalogRecord, CatalogStore, ColorSpec,
        Error, ModelNumber, PaintService, Result, RgbColor, SearchCriteria, SimilarityQuery,
        SortOption,
    };
}
