//! HTTP adapter for the translate endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HistoryResponse, TranslationRequest, TranslationResponse};
pub use handlers::{TranslateApiError, TranslateAppState};
pub use routes::{translate_router, translate_routes};
