//! # Pigment Core
//!
//! Domain types and structured search for the Pigment paint catalog.
//!
//! - [`ColorSpec`] - Hex color with its derived RGB and HSL views
//! - [`ModelNumber`] - Product code with a natural-order sort key
//! - [`SearchCriteria`] / [`SimilarityQuery`] - Normalized query input
//! - [`CatalogFilter`] - Facet and tag-category filtering
//! - [`planner::search`] - Filter, order and paginate catalog records
//!
//! ## Example
//!
//! ```rust
//! use pigment_core::{CatalogRecord, ColorSpec, ModelNumber, SearchCriteria, SortOption, TagIndex};
//! use pigment_core::planner;
//!
//! let records = vec![
//!     CatalogRecord::new("1", "Flat Red", ModelNumber::new("XF-7").unwrap(),
//!         ColorSpec::from_hex("#C8102E").unwrap()).unwrap().with_brand("tamiya", "Tamiya"),
//!     CatalogRecord::new("2", "Flat Black", ModelNumber::new("XF-1").unwrap(),
//!         ColorSpec::from_hex("#1A1A1A").unwrap()).unwrap().with_brand("tamiya", "Tamiya"),
//! ];
//!
//! let criteria = SearchCriteria { sort: SortOption::ModelNumberAsc, ..Default::default() };
//! let page = planner::search(&criteria, &records, &TagIndex::default());
//! assert_eq!(page.items[0].id, "2");
//! ```

pub mod color;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod model_number;
pub mod planner;
pub mod record;

pub use color::{hex_to_hsl, hex_to_rgb, ColorSpec, HexColor, HslColor, RgbColor};
pub use criteria::{SearchCriteria, SimilarityQuery, SortOption};
pub use error::{Error, FieldIssue, Result};
pub use filter::{CatalogFilter, Filter, FilterCondition, TagIndex};
pub use model_number::{parse_sort_key, ModelNumber};
pub use planner::Page;
pub use record::{CatalogRecord, MasterItem, Tag, TagRef};
