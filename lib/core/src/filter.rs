// Facet filters over catalog records
use ahash::{AHashMap, AHashSet};
use crate::criteria::SearchCriteria;
use crate::record::{CatalogRecord, Tag};

pub trait Filter {
    fn matches(&self, record: &CatalogRecord) -> bool;
}

#[derive(Debug, Clone)]
pub enum FilterCondition {
    BrandIn(AHashSet<String>),
    PaintTypeIn(AHashSet<String>),
    GlossIn(AHashSet<String>),
    /// Passes when the record carries at least one of the tags
    HasAnyTag(AHashSet<String>),
    And(Vec<FilterCondition>),
}

/// Maps tag ids to the category they belong to
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    categories: AHashMap<String, String>,
}

impl TagIndex {
    pub fn from_tags(tags: &[Tag]) -> Self {
        let categories = tags
            .iter()
            .map(|t| (t.id.clone(), t.category_id.clone()))
            .collect();
        Self { categories }
    }

    pub fn category_of(&self, tag_id: &str) -> Option<&str> {
        self.categories.get(tag_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Partition selected tag ids by category in one pass.
    ///
    /// Ids the index does not know are dropped. Groups come back in the
    /// order their category first appears in `tag_ids`.
    pub fn group_by_category(&self, tag_ids: &[String]) -> Vec<AHashSet<String>> {
        let mut slots: AHashMap<&str, usize> = AHashMap::new();
        let mut groups: Vec<AHashSet<String>> = Vec::new();

        for tag_id in tag_ids {
            let Some(category) = self.category_of(tag_id) else {
                continue;
            };
            let slot = *slots.entry(category).or_insert_with(|| {
                groups.push(AHashSet::new());
                groups.len() - 1
            });
            groups[slot].insert(tag_id.clone());
        }

        groups
    }
}

pub struct CatalogFilter {
    condition: FilterCondition,
}

impl CatalogFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// Build the filter for a set of criteria.
    ///
    /// Empty facet lists add no condition. Tags become one `HasAnyTag` per
    /// category, all of which must pass.
    pub fn from_criteria(criteria: &SearchCriteria, tags: &TagIndex) -> Self {
        let mut conditions = Vec::new();

        if !criteria.brand_ids.is_empty() {
            conditions.push(FilterCondition::BrandIn(to_set(&criteria.brand_ids)));
        }
        if !criteria.paint_type_ids.is_empty() {
            conditions.push(FilterCondition::PaintTypeIn(to_set(&criteria.paint_type_ids)));
        }
        if !criteria.gloss_ids.is_empty() {
            conditions.push(FilterCondition::GlossIn(to_set(&criteria.gloss_ids)));
        }
        conditions.extend(
            tags.group_by_category(&criteria.tag_ids)
                .into_iter()
                .map(FilterCondition::HasAnyTag),
        );

        Self::new(FilterCondition::And(conditions))
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, record: &CatalogRecord) -> bool {
        match condition {
            FilterCondition::BrandIn(ids) => ids.contains(&record.brand_id),
            FilterCondition::PaintTypeIn(ids) => ids.contains(&record.paint_type_id),
            FilterCondition::GlossIn(ids) => ids.contains(&record.gloss_id),
            FilterCondition::HasAnyTag(ids) => {
                record.tags.iter().any(|t| ids.contains(&t.tag_id))
            }
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
        }
    }
}

impl Filter for CatalogFilter {
    fn matches(&self, record: &CatalogRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}

fn to_set(ids: &[String]) -> AHashSet<String> {
    ids.iter().cloned().collect()
}
