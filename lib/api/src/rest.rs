use crate::service::{ColorSearchRequest, PaintService, SearchRequest};
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use chrono::Utc;
use pigment_core::{Error, FieldIssue};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

pub const VALIDATION_ERROR: &str = "E-400-001";
pub const NOT_FOUND: &str = "E-404-001";
pub const SYSTEM_ERROR: &str = "E-500-01";

/// Error rendered as the standard JSON error body
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Vec<FieldIssue>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: VALIDATION_ERROR,
            message: message.into(),
            details,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        if e.is_client_error() {
            return Self::bad_request("Validation failed", e.issues());
        }
        match e {
            Error::NotFound(what) => Self {
                status: StatusCode::NOT_FOUND,
                code: NOT_FOUND,
                message: format!("Resource not found: {what}"),
                details: Vec::new(),
            },
            other => {
                error!(error = %other, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: SYSTEM_ERROR,
                    message: "An unexpected error occurred".to_string(),
                    details: Vec::new(),
                }
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({
            "error": {
                "status": self.status.as_u16(),
                "code": self.code,
                "message": self.message,
                "details": self.details,
                "timestamp": Utc::now().to_rfc3339(),
            }
        }))
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        service: Arc<PaintService>,
        bind: String,
        port: u16,
    ) -> std::io::Result<()> {
        info!(%bind, port, "Starting REST API");
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(service.clone()))
                .configure(configure)
        })
        .bind((bind.as_str(), port))?
        .run()
        .await
    }
}

/// Register routes and the JSON body error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(
            "Malformed request body",
            vec![FieldIssue {
                field: None,
                issue: err.to_string(),
            }],
        )
        .into()
    }))
    .route("/healthz", web::get().to(health))
    .route("/api/masters", web::get().to(masters))
    .route("/api/paints/search", web::post().to(search_paints))
    .route("/api/paints/color-search", web::post().to(color_search))
    .route("/api/paints/{id}", web::get().to(get_paint));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn masters(service: web::Data<Arc<PaintService>>) -> HttpResponse {
    HttpResponse::Ok().json(service.masters())
}

async fn search_paints(
    service: web::Data<Arc<PaintService>>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let response = service.search(&req).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn color_search(
    service: web::Data<Arc<PaintService>>,
    req: web::Json<ColorSearchRequest>,
) -> ActixResult<HttpResponse> {
    let response = service.search_similar(&req).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn get_paint(
    service: web::Data<Arc<PaintService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let detail = service.get_by_id(&id).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use pigment_storage::{Catalog, CatalogStore};
    use serde_json::Value;

    fn service() -> Arc<PaintService> {
        let doc = json!({
            "brands": [{"id": "acme", "name": "Acme"}],
            "paintTypes": [{"id": "acrylic", "name": "Acrylic"}],
            "glosses": [{"id": "flat", "name": "Flat"}],
            "paints": [
                {"id": "1", "name": "Red", "modelNumber": "R-1", "brandId": "acme",
                 "paintTypeId": "acrylic", "glossId": "flat", "hex": "#FF0000"},
                {"id": "2", "name": "Orange Red", "modelNumber": "R-2", "brandId": "acme",
                 "paintTypeId": "acrylic", "glossId": "flat", "hex": "#FF1100"}
            ]
        });
        let catalog = Catalog::from_json(&doc.to_string()).unwrap();
        Arc::new(PaintService::new(Arc::new(CatalogStore::from_catalog(catalog))))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(service()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_healthz() {
        let app = app!();
        let req = test::TestRequest::get().uri("/healthz").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/paints/search")
            .set_json(json!({"sort": "nameDesc", "brandIds": null}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["pageSize"], 20);
        assert_eq!(body["items"][0]["name"], "Red");
        assert_eq!(body["items"][0]["modelNumber"], "R-1");
        assert_eq!(body["items"][0]["brand"], "Acme");
        assert_eq!(body["items"][0]["hex"], "#FF0000");
    }

    #[actix_web::test]
    async fn test_color_search_endpoint() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/paints/color-search")
            .set_json(json!({"r": 255, "g": 0, "b": 0, "threshold": 10}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][1]["id"], "2");
        assert_eq!(body["items"][1]["similarity"], 0.625);
    }

    #[actix_web::test]
    async fn test_color_search_out_of_range_is_400() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/paints/color-search")
            .set_json(json!({"r": 300, "g": 0, "b": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["status"], 400);
        assert_eq!(body["error"]["code"], VALIDATION_ERROR);
        assert_eq!(body["error"]["details"][0]["field"], "r");
        assert!(body["error"]["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_400() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/paints/color-search")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"r\": \"red\"}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], VALIDATION_ERROR);
    }

    #[actix_web::test]
    async fn test_get_paint_and_missing() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/paints/2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rgb"], json!({"r": 255, "g": 17, "b": 0}));
        assert_eq!(body["brand"]["id"], "acme");
        assert_eq!(body["paintType"], json!({"id": "acrylic", "name": "Acrylic"}));
        assert_eq!(body["gloss"], json!({"id": "flat", "name": "Flat"}));

        let req = test::TestRequest::get().uri("/api/paints/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_masters_endpoint() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/masters").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["brands"][0]["name"], "Acme");
        assert_eq!(body["paintTypes"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["tags"], json!([]));
    }

    #[actix_web::test]
    async fn test_error_mapping() {
        assert_eq!(ApiError::from(Error::format("hex", "bad")).code(), VALIDATION_ERROR);
        assert_eq!(ApiError::from(Error::NotFound("x".into())).code(), NOT_FOUND);
        assert_eq!(ApiError::from(Error::Storage("disk".into())).code(), SYSTEM_ERROR);
    }
}
