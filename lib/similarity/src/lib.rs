//! # Pigment Similarity
//!
//! Perceptual color matching for the Pigment catalog.
//!
//! - [`ciede2000`] - CIEDE2000 distance between two sRGB colors
//! - [`rank`] - Threshold, order and paginate catalog records by distance
//!
//! ## Example
//!
//! ```rust
//! use pigment_core::RgbColor;
//! use pigment_similarity::ciede2000;
//!
//! let red = RgbColor::from_u8(255, 0, 0);
//! let orange_red = RgbColor::from_u8(255, 17, 0);
//! assert!(ciede2000(orange_red, red) < 1.0);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! target rgb ──> Lab ──┐
//!                      ├──> ΔE00 ──> threshold ──> sort ──> window(100) ──> page
//! record hex ──> Lab ──┘
//! ```

pub mod ciede2000;
pub mod rank;

pub use ciede2000::{ciede2000, ciede2000_lab, Lab};
pub use rank::{rank, RankedRecord, MAX_RESULT_WINDOW};
