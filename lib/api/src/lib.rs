pub mod rest;
pub mod service;

pub use rest::{ApiError, RestApi};
pub use service::{ColorSearchRequest, PaintService, SearchRequest};
