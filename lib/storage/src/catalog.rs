// Catalog snapshot document and its validated in-memory form
use chrono::{DateTime, Utc};
use pigment_core::{
    CatalogRecord, ColorSpec, Error, HexColor, HslColor, MasterItem, ModelNumber, Result,
    RgbColor, Tag, TagIndex, TagRef,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk catalog snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub brands: Vec<MasterData>,
    #[serde(default)]
    pub paint_types: Vec<MasterData>,
    #[serde(default)]
    pub glosses: Vec<MasterData>,
    #[serde(default)]
    pub tag_categories: Vec<MasterData>,
    #[serde(default)]
    pub tags: Vec<TagData>,
    #[serde(default)]
    pub paints: Vec<PaintData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterData {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagData {
    pub id: String,
    pub name: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RgbData {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HslData {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintData {
    pub id: String,
    pub name: String,
    pub model_number: String,
    pub brand_id: String,
    pub paint_type_id: String,
    pub gloss_id: String,
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<RgbData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl: Option<HslData>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Master lists exposed to clients for building search forms
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Masters {
    pub brands: Vec<MasterItem>,
    pub paint_types: Vec<MasterItem>,
    pub glosses: Vec<MasterItem>,
    pub tag_categories: Vec<MasterItem>,
    pub tags: Vec<Tag>,
}

impl Masters {
    pub fn paint_type_name(&self, id: &str) -> Option<&str> {
        name_of(&self.paint_types, id)
    }

    pub fn gloss_name(&self, id: &str) -> Option<&str> {
        name_of(&self.glosses, id)
    }
}

fn name_of<'a>(items: &'a [MasterItem], id: &str) -> Option<&'a str> {
    items.iter().find(|m| m.id == id).map(|m| m.name.as_str())
}

/// A validated, immutable catalog.
///
/// Soft-deleted paints and tags are dropped while loading, so nothing
/// downstream ever sees them.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    by_id: HashMap<String, usize>,
    masters: Masters,
    tag_index: TagIndex,
    generated_at: Option<DateTime<Utc>>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let document: CatalogDocument = serde_json::from_slice(&bytes)?;
        Self::from_document(document)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            masters: Masters::default(),
            tag_index: TagIndex::default(),
            generated_at: None,
            loaded_at: Utc::now(),
        }
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let brands = master_items(document.brands, "brand")?;
        let paint_types = master_items(document.paint_types, "paintType")?;
        let glosses = master_items(document.glosses, "gloss")?;
        let tag_categories = master_items(document.tag_categories, "tagCategory")?;

        let brand_names: HashMap<&str, &str> = brands
            .iter()
            .map(|b| (b.id.as_str(), b.name.as_str()))
            .collect();
        let has_paint_type = |id: &str| paint_types.iter().any(|m| m.id == id);
        let has_gloss = |id: &str| glosses.iter().any(|m| m.id == id);

        let mut tags = Vec::with_capacity(document.tags.len());
        for tag in document.tags.into_iter().filter(|t| !t.is_deleted) {
            if !tag_categories.iter().any(|c| c.id == tag.category_id) {
                return Err(Error::Storage(format!(
                    "tag '{}' references unknown category '{}'",
                    tag.id, tag.category_id
                )));
            }
            let hex = tag
                .hex
                .map(|h| HexColor::new(h).map(|h| h.as_str().to_string()))
                .transpose()?;
            tags.push(Tag {
                id: tag.id,
                name: tag.name,
                category_id: tag.category_id,
                hex,
                effect: tag.effect,
                description: tag.description,
            });
        }
        tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let tag_index = TagIndex::from_tags(&tags);

        let mut records = Vec::with_capacity(document.paints.len());
        let mut by_id = HashMap::with_capacity(document.paints.len());
        for paint in document.paints.into_iter().filter(|p| !p.is_deleted) {
            let Some(brand_name) = brand_names.get(paint.brand_id.as_str()) else {
                return Err(unknown_reference(&paint.id, "brand", &paint.brand_id));
            };
            if !has_paint_type(&paint.paint_type_id) {
                return Err(unknown_reference(&paint.id, "paint type", &paint.paint_type_id));
            }
            if !has_gloss(&paint.gloss_id) {
                return Err(unknown_reference(&paint.id, "gloss", &paint.gloss_id));
            }

            let rgb = paint
                .rgb
                .map(|c| RgbColor::new(c.r, c.g, c.b))
                .transpose()?;
            let hsl = paint
                .hsl
                .map(|c| HslColor::new(c.h, c.s, c.l))
                .transpose()?;
            let color = ColorSpec::new(&paint.hex, rgb, hsl)?;

            let mut record = CatalogRecord::new(
                paint.id.clone(),
                paint.name,
                ModelNumber::new(paint.model_number)?,
                color,
            )?
            .with_brand(paint.brand_id, *brand_name)
            .with_paint_type(paint.paint_type_id)
            .with_gloss(paint.gloss_id);

            // references to unknown or deleted tags are dropped
            for tag_id in paint.tag_ids {
                if let Some(category) = tag_index.category_of(&tag_id) {
                    if !record.has_tag(&tag_id) {
                        let tag = TagRef::new(tag_id.as_str(), category);
                        record = record.with_tag(tag);
                    }
                }
            }
            if let Some(description) = paint.description {
                record = record.with_description(description);
            }
            if let Some(url) = paint.image_url {
                record = record.with_image_url(url);
            }

            if by_id.insert(paint.id.clone(), records.len()).is_some() {
                return Err(Error::Storage(format!("duplicate paint id '{}'", paint.id)));
            }
            records.push(record);
        }

        Ok(Self {
            records,
            by_id,
            masters: Masters {
                brands,
                paint_types,
                glosses,
                tag_categories,
                tags,
            },
            tag_index,
            generated_at: document.generated_at,
            loaded_at: Utc::now(),
        })
    }

    #[inline]
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    #[inline]
    pub fn find(&self, id: &str) -> Option<&CatalogRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    #[inline]
    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    #[inline]
    pub fn masters(&self) -> &Masters {
        &self.masters
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.masters.tags.iter().find(|t| t.id == id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Validated master rows ordered by name, then id
fn master_items(items: Vec<MasterData>, kind: &str) -> Result<Vec<MasterItem>> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    let mut out = items
        .into_iter()
        .map(|item| {
            if item.name.trim().is_empty() {
                return Err(Error::Storage(format!("{kind} '{}' has an empty name", item.id)));
            }
            if !seen.insert(item.id.clone()) {
                return Err(Error::Storage(format!("duplicate {kind} id '{}'", item.id)));
            }
            Ok(MasterItem {
                id: item.id,
                name: item.name,
                description: item.description,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Ok(out)
}

fn unknown_reference(paint_id: &str, kind: &str, id: &str) -> Error {
    Error::Storage(format!("paint '{paint_id}' references unknown {kind} '{id}'"))
}
