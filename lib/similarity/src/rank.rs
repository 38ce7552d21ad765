//! Similarity ranking
//!
//! Scores every catalog record against a target color, keeps those within
//! the threshold and orders them closest first.

use crate::ciede2000::{ciede2000_lab, Lab};
use ordered_float::OrderedFloat;
use pigment_core::color::round4;
use pigment_core::{CatalogRecord, Page, SimilarityQuery};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Upper bound on how many matches a similarity search can return
pub const MAX_RESULT_WINDOW: usize = 100;

/// A record with its distance to the target color
#[derive(Debug, Clone, Copy)]
pub struct RankedRecord<'a> {
    pub record: &'a CatalogRecord,
    /// CIEDE2000 distance, rounded to 4 decimal places
    pub similarity: f64,
}

/// Rank `records` by distance to the query's target.
///
/// Matches are ordered by distance, then name, then id. Only the first
/// [`MAX_RESULT_WINDOW`] matches are kept; the page is cut from that window
/// and `total` reports the window size.
pub fn rank<'a>(query: &SimilarityQuery, records: &'a [CatalogRecord]) -> Page<RankedRecord<'a>> {
    let query = query.clone().normalized();
    let target = Lab::from_rgb(query.target);

    let mut matches: Vec<RankedRecord<'a>> = records
        .par_iter()
        .filter_map(|record| {
            let candidate = Lab::from_rgb(record.color.rgb());
            let similarity = round4(ciede2000_lab(candidate, target));
            (similarity <= query.threshold).then_some(RankedRecord { record, similarity })
        })
        .collect();

    matches.par_sort_unstable_by(compare);
    matches.truncate(MAX_RESULT_WINDOW);

    let page_size = usize::try_from(query.page_size).unwrap_or(0);
    Page::slice(matches, query.offset(), page_size)
}

fn compare(a: &RankedRecord<'_>, b: &RankedRecord<'_>) -> Ordering {
    OrderedFloat(a.similarity)
        .cmp(&OrderedFloat(b.similarity))
        .then_with(|| a.record.name.cmp(&b.record.name))
        .then_with(|| a.record.id.cmp(&b.record.id))
}
