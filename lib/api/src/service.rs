//! Query service sitting between the transport layer and the catalog
//!
//! Every call takes a fresh catalog snapshot, so a reload never changes the
//! data underneath a request that is already running.

use pigment_core::color::round4;
use pigment_core::{planner, CatalogRecord, Error, Result, SearchCriteria, SimilarityQuery, SortOption, Tag};
use pigment_similarity::rank;
use pigment_storage::{CatalogStore, Masters};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Structured search input as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub brand_ids: Option<Vec<String>>,
    #[serde(default)]
    pub paint_type_ids: Option<Vec<String>>,
    #[serde(default)]
    pub gloss_ids: Option<Vec<String>>,
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub page_size: Option<i32>,
}

impl SearchRequest {
    pub fn to_criteria(&self) -> SearchCriteria {
        let defaults = SearchCriteria::default();
        SearchCriteria {
            brand_ids: self.brand_ids.clone().unwrap_or_default(),
            paint_type_ids: self.paint_type_ids.clone().unwrap_or_default(),
            gloss_ids: self.gloss_ids.clone().unwrap_or_default(),
            tag_ids: self.tag_ids.clone().unwrap_or_default(),
            sort: SortOption::parse_or_default(self.sort.as_deref()),
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
        .normalized()
    }
}

/// Color-similarity search input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSearchRequest {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub page_size: Option<i32>,
}

impl ColorSearchRequest {
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r,
            g,
            b,
            threshold: None,
            page: None,
            page_size: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_page(mut self, page: i32, page_size: i32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Normalized and validated query; out-of-range channels are rejected
    pub fn to_query(&self) -> Result<SimilarityQuery> {
        let query = SimilarityQuery::from_components(
            self.r,
            self.g,
            self.b,
            self.threshold,
            self.page,
            self.page_size,
        )?
        .normalized();
        query.validate()?;
        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintSummary {
    pub id: String,
    pub name: String,
    pub model_number: String,
    pub brand: String,
    pub hex: String,
}

impl From<&CatalogRecord> for PaintSummary {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            model_number: record.model_number.as_str().to_string(),
            brand: record.brand_name.clone(),
            hex: record.color.hex().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<PaintSummary>,
    pub total: usize,
    pub page: i32,
    pub page_size: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarPaint {
    #[serde(flatten)]
    pub paint: PaintSummary,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarResponse {
    pub items: Vec<SimilarPaint>,
    pub total: usize,
    pub page: i32,
    pub page_size: i32,
}

/// Id and display name of a brand, paint type or gloss
#[derive(Debug, Clone, Serialize)]
pub struct MasterRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RgbView {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct HslView {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Full paint view returned by id lookups
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintDetail {
    pub id: String,
    pub name: String,
    pub model_number: String,
    pub brand: MasterRef,
    pub paint_type: MasterRef,
    pub gloss: MasterRef,
    pub hex: String,
    pub rgb: RgbView,
    pub hsl: HslView,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

pub struct PaintService {
    store: Arc<CatalogStore>,
}

impl PaintService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let criteria = request.to_criteria();
        info!(
            brands = criteria.brand_ids.len(),
            paint_types = criteria.paint_type_ids.len(),
            glosses = criteria.gloss_ids.len(),
            tags = criteria.tag_ids.len(),
            sort = %criteria.sort,
            page = criteria.page,
            page_size = criteria.page_size,
            "Paint search started"
        );

        let catalog = self.store.snapshot();
        let page = planner::search(&criteria, catalog.records(), catalog.tag_index());

        info!(total = page.total, returned = page.items.len(), "Paint search completed");
        Ok(SearchResponse {
            items: page.items.into_iter().map(PaintSummary::from).collect(),
            total: page.total,
            page: criteria.page,
            page_size: criteria.page_size,
        })
    }

    pub fn search_similar(&self, request: &ColorSearchRequest) -> Result<SimilarResponse> {
        let query = request.to_query()?;
        info!(
            r = query.target.r(),
            g = query.target.g(),
            b = query.target.b(),
            threshold = query.threshold,
            page = query.page,
            page_size = query.page_size,
            "Color search started"
        );

        let catalog = self.store.snapshot();
        let page = rank(&query, catalog.records());

        info!(total = page.total, returned = page.items.len(), "Color search completed");
        Ok(SimilarResponse {
            items: page
                .items
                .into_iter()
                .map(|ranked| SimilarPaint {
                    paint: PaintSummary::from(ranked.record),
                    similarity: ranked.similarity,
                })
                .collect(),
            total: page.total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    pub fn get_by_id(&self, id: &str) -> Result<PaintDetail> {
        debug!(id, "Paint lookup");
        let catalog = self.store.snapshot();
        let record = catalog
            .find(id)
            .ok_or_else(|| Error::NotFound(format!("paint '{id}'")))?;

        let masters = catalog.masters();
        let rgb = record.color.rgb();
        let hsl = record.color.hsl();
        let tags = record
            .tags
            .iter()
            .filter_map(|t| catalog.tag(&t.tag_id).cloned())
            .collect();

        Ok(PaintDetail {
            id: record.id.clone(),
            name: record.name.clone(),
            model_number: record.model_number.as_str().to_string(),
            brand: MasterRef {
                id: record.brand_id.clone(),
                name: record.brand_name.clone(),
            },
            paint_type: MasterRef {
                id: record.paint_type_id.clone(),
                name: masters
                    .paint_type_name(&record.paint_type_id)
                    .unwrap_or_default()
                    .to_string(),
            },
            gloss: MasterRef {
                id: record.gloss_id.clone(),
                name: masters
                    .gloss_name(&record.gloss_id)
                    .unwrap_or_default()
                    .to_string(),
            },
            hex: record.color.hex().as_str().to_string(),
            rgb: RgbView {
                r: rgb.r(),
                g: rgb.g(),
                b: rgb.b(),
            },
            hsl: HslView {
                h: round4(hsl.h()),
                s: round4(hsl.s()),
                l: round4(hsl.l()),
            },
            tags,
            description: record.description.clone(),
            image_url: record.image_url.clone(),
        })
    }

    pub fn masters(&self) -> Masters {
        self.store.snapshot().masters().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigment_storage::Catalog;
    use serde_json::json;

    fn service() -> PaintService {
        let doc = json!({
            "brands": [{"id": "acme", "name": "Acme"}, {"id": "zeta", "name": "Zeta"}],
            "paintTypes": [{"id": "acrylic", "name": "Acrylic"}],
            "glosses": [{"id": "flat", "name": "Flat"}],
            "tagCategories": [{"id": "finish", "name": "Finish"}, {"id": "tone", "name": "Tone"}],
            "tags": [
                {"id": "matte", "name": "Matte", "categoryId": "finish"},
                {"id": "glossy", "name": "Glossy", "categoryId": "finish"},
                {"id": "warm", "name": "Warm", "categoryId": "tone"}
            ],
            "paints": [
                {"id": "1", "name": "Red", "modelNumber": "B-001", "brandId": "acme",
                 "paintTypeId": "acrylic", "glossId": "flat", "hex": "#FF0000", "tagIds": ["matte"]},
                {"id": "2", "name": "Orange Red", "modelNumber": "A-002", "brandId": "acme",
                 "paintTypeId": "acrylic", "glossId": "flat", "hex": "#FF1100", "tagIds": ["glossy", "warm"]},
                {"id": "3", "name": "Green", "modelNumber": "A-001", "brandId": "zeta",
                 "paintTypeId": "acrylic", "glossId": "flat", "hex": "#00FF00"}
            ]
        });
        let catalog = Catalog::from_json(&doc.to_string()).unwrap();
        PaintService::new(Arc::new(CatalogStore::from_catalog(catalog)))
    }

    #[test]
    fn test_search_defaults() {
        let response = service().search(&SearchRequest::default()).unwrap();
        assert_eq!(response.total, 3);
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 20);
        let ids: Vec<_> = response.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_search_tag_groups() {
        let request = SearchRequest {
            tag_ids: Some(vec!["glossy".into(), "warm".into()]),
            ..Default::default()
        };
        let response = service().search(&request).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.items[0].id, "2");
    }

    #[test]
    fn test_search_unknown_sort_falls_back() {
        let request = SearchRequest {
            sort: Some("price".into()),
            page: Some(0),
            page_size: Some(-1),
            ..Default::default()
        };
        let response = service().search(&request).unwrap();
        assert_eq!(response.items[0].id, "2");
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 20);
    }

    #[test]
    fn test_search_similar() {
        let request = ColorSearchRequest::new(255, 0, 0).with_threshold(10.0);
        let response = service().search_similar(&request).unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.items[0].paint.id, "1");
        assert_eq!(response.items[0].similarity, 0.0);
        assert_eq!(response.items[1].paint.id, "2");
        assert!((response.items[1].similarity - 0.625).abs() < 1.5e-4);
        assert_eq!(response.page_size, 30);
    }

    #[test]
    fn test_search_similar_rejects_bad_channel() {
        let err = service()
            .search_similar(&ColorSearchRequest::new(300, 0, 0))
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.issues()[0].field.as_deref(), Some("r"));
    }

    #[test]
    fn test_search_similar_clamps_paging() {
        let request = ColorSearchRequest::new(0, 0, 0)
            .with_threshold(500.0)
            .with_page(-2, 1000);
        let response = service().search_similar(&request).unwrap();
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 100);
        assert_eq!(response.total, 3);
    }

    #[test]
    fn test_get_by_id() {
        let svc = service();
        let detail = svc.get_by_id("2").unwrap();
        assert_eq!(detail.brand.name, "Acme");
        assert_eq!(detail.paint_type.id, "acrylic");
        assert_eq!(detail.paint_type.name, "Acrylic");
        assert_eq!(detail.gloss.name, "Flat");
        assert_eq!(detail.rgb.g, 17);
        assert_eq!(detail.tags.len(), 2);

        assert!(matches!(svc.get_by_id("missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_masters() {
        let masters = service().masters();
        assert_eq!(masters.brands.len(), 2);
        assert_eq!(masters.tag_categories.len(), 2);
        assert_eq!(masters.tags.len(), 3);
    }
}
