use crate::color::ColorSpec;
use crate::model_number::ModelNumber;
use crate::{Error, Result};
use serde::Serialize;

/// A tag attached to a paint, with the category it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub tag_id: String,
    pub category_id: String,
}

impl TagRef {
    pub fn new(tag_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            tag_id: tag_id.into(),
            category_id: category_id.into(),
        }
    }
}

/// One paint in the catalog, as seen by search
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub model_number: ModelNumber,
    pub brand_id: String,
    pub brand_name: String,
    pub paint_type_id: String,
    pub gloss_id: String,
    pub color: ColorSpec,
    pub tags: Vec<TagRef>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CatalogRecord {
    /// Create a record with empty facets; use the `with_*` builders to fill them
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model_number: ModelNumber,
        color: ColorSpec,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::format("name", "cannot be empty"));
        }
        Ok(Self {
            id: id.into(),
            name,
            model_number,
            brand_id: String::new(),
            brand_name: String::new(),
            paint_type_id: String::new(),
            gloss_id: String::new(),
            color,
            tags: Vec::new(),
            description: None,
            image_url: None,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_brand(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.brand_id = id.into();
        self.brand_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_paint_type(mut self, id: impl Into<String>) -> Self {
        self.paint_type_id = id.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_gloss(mut self, id: impl Into<String>) -> Self {
        self.gloss_id = id.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.tag_id == tag_id)
    }
}

/// A brand, paint type, gloss level or tag category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
