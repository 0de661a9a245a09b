//! Axum routes for translate endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{delete_history, get_history, post_translate, TranslateAppState};

/// Creates routes for translate endpoints.
///
/// REST Endpoints:
/// - POST /translate - Translate, peek, or clear (by `command`)
/// - GET /translate/history - Current thread history
/// - DELETE /translate/history - Clear thread history
pub fn translate_routes() -> Router<TranslateAppState> {
    Router::new()
        .route("/translate", post(post_translate))
        .route("/translate/history", get(get_history).delete(delete_history))
}

/// Combined router with all translate routes under /api.
pub fn translate_router() -> Router<TranslateAppState> {
    Router::new().nest("/api", translate_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_router_creates_combined_router() {
        let _router = translate_router();
    }
}
