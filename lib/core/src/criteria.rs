//! Search criteria and their normalization
//!
//! Normalization is total and idempotent: out-of-range paging and threshold
//! values are replaced with defaults or clamped, never rejected.

use crate::color::RgbColor;
use crate::error::FieldIssue;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_SEARCH_PAGE_SIZE: i32 = 20;
pub const DEFAULT_SIMILAR_PAGE_SIZE: i32 = 30;
pub const MAX_SIMILAR_PAGE_SIZE: i32 = 100;
pub const DEFAULT_THRESHOLD: f64 = 5.0;
pub const MAX_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOption {
    NameAsc,
    NameDesc,
    #[default]
    ModelNumberAsc,
    ModelNumberDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::ModelNumberAsc,
        SortOption::ModelNumberDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "NameAsc",
            SortOption::NameDesc => "NameDesc",
            SortOption::ModelNumberAsc => "ModelNumberAsc",
            SortOption::ModelNumberDesc => "ModelNumberDesc",
        }
    }

    /// Parse a sort name, falling back to [`SortOption::ModelNumberAsc`]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for SortOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::format("sort", format!("unknown sort option '{s}'")))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facet filters, ordering and paging for a structured search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub brand_ids: Vec<String>,
    pub paint_type_ids: Vec<String>,
    pub gloss_ids: Vec<String>,
    pub tag_ids: Vec<String>,
    pub sort: SortOption,
    pub page: i32,
    pub page_size: i32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            brand_ids: Vec::new(),
            paint_type_ids: Vec::new(),
            gloss_ids: Vec::new(),
            tag_ids: Vec::new(),
            sort: SortOption::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

impl SearchCriteria {
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.page <= 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.page_size <= 0 {
            self.page_size = DEFAULT_SEARCH_PAGE_SIZE;
        }
        self
    }

    pub fn offset(&self) -> usize {
        offset(self.page, self.page_size)
    }

    pub fn has_filters(&self) -> bool {
        !(self.brand_ids.is_empty()
            && self.paint_type_ids.is_empty()
            && self.gloss_ids.is_empty()
            && self.tag_ids.is_empty())
    }
}

/// A color-similarity search around a target color
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    pub target: RgbColor,
    pub threshold: f64,
    pub page: i32,
    pub page_size: i32,
}

impl SimilarityQuery {
    pub fn new(
        target: RgbColor,
        threshold: Option<f64>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Self {
        Self {
            target,
            threshold: threshold.unwrap_or(DEFAULT_THRESHOLD),
            page: page.unwrap_or(DEFAULT_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_SIMILAR_PAGE_SIZE),
        }
    }

    /// Build from raw channels; out-of-range channels are a format error
    pub fn from_components(
        r: i32,
        g: i32,
        b: i32,
        threshold: Option<f64>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Self> {
        Ok(Self::new(RgbColor::new(r, g, b)?, threshold, page, page_size))
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.page <= 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.page_size <= 0 {
            self.page_size = DEFAULT_SIMILAR_PAGE_SIZE;
        }
        self.page_size = self.page_size.min(MAX_SIMILAR_PAGE_SIZE);
        // NaN falls through to the default as well
        self.threshold = if self.threshold > 0.0 {
            self.threshold.min(MAX_THRESHOLD)
        } else {
            DEFAULT_THRESHOLD
        };
        self
    }

    /// Check the ranges a normalized query must satisfy
    pub fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();
        if !(self.threshold > 0.0 && self.threshold <= MAX_THRESHOLD) {
            issues.push(FieldIssue::new(
                "threshold",
                format!("must be greater than 0 and at most {MAX_THRESHOLD}"),
            ));
        }
        if self.page < 1 {
            issues.push(FieldIssue::new("page", "must be at least 1"));
        }
        if !(1..=MAX_SIMILAR_PAGE_SIZE).contains(&self.page_size) {
            issues.push(FieldIssue::new(
                "pageSize",
                format!("must be between 1 and {MAX_SIMILAR_PAGE_SIZE}"),
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(issues))
        }
    }

    pub fn offset(&self) -> usize {
        offset(self.page, self.page_size)
    }
}

fn offset(page: i32, page_size: i32) -> usize {
    let pages_before = usize::try_from(page.saturating_sub(1)).unwrap_or(0);
    let page_size = usize::try_from(page_size).unwrap_or(0);
    pages_before.saturating_mul(page_size)
}
