//! Structured catalog search: filter, order, paginate
use crate::criteria::{SearchCriteria, SortOption};
use crate::filter::{CatalogFilter, Filter, TagIndex};
use crate::record::CatalogRecord;
use std::cmp::Ordering;

/// One page of results plus the unpaginated match count
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    /// Cut `page_size` items starting at `offset` out of an ordered result set
    pub fn slice(all: Vec<T>, offset: usize, page_size: usize) -> Self {
        let total = all.len();
        let items = all.into_iter().skip(offset).take(page_size).collect();
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Run a structured search over `records`.
///
/// The criteria are normalized first, so callers may pass raw input.
pub fn search<'a>(
    criteria: &SearchCriteria,
    records: &'a [CatalogRecord],
    tags: &TagIndex,
) -> Page<&'a CatalogRecord> {
    let criteria = criteria.clone().normalized();
    let filter = CatalogFilter::from_criteria(&criteria, tags);

    let mut matched: Vec<&CatalogRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    matched.sort_by(|a, b| compare(criteria.sort, a, b));

    let page_size = usize::try_from(criteria.page_size).unwrap_or(0);
    Page::slice(matched, criteria.offset(), page_size)
}

/// Total order used by `search`; ties always fall back to id ascending
pub fn compare(sort: SortOption, a: &CatalogRecord, b: &CatalogRecord) -> Ordering {
    let primary = match sort {
        SortOption::NameAsc => a.name.cmp(&b.name),
        SortOption::NameDesc => b.name.cmp(&a.name),
        SortOption::ModelNumberAsc => model_key(a).cmp(&model_key(b)),
        SortOption::ModelNumberDesc => model_key(b).cmp(&model_key(a)),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

// Missing prefix or number trails in ascending order and leads in descending
fn model_key(r: &CatalogRecord) -> (&str, bool, Option<&str>, bool, Option<i32>) {
    let prefix = r.model_number.sort_prefix();
    let number = r.model_number.sort_number();
    (
        r.brand_name.as_str(),
        prefix.is_none(),
        prefix,
        number.is_none(),
        number,
    )
}
