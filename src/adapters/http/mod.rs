//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles every route behind the thread identity middleware.
//! Cross-cutting layers (tracing, CORS, timeouts) are added by the binary.

pub mod health;
pub mod middleware;
pub mod translate;

use axum::Router;

pub use middleware::{thread_middleware, ThreadContext, THREAD_ID_HEADER};
pub use translate::{translate_router, TranslateAppState};

/// Full application router.
pub fn app_router(state: TranslateAppState) -> Router {
    translate_router()
        .merge(health::health_router())
        .layer(axum::middleware::from_fn(thread_middleware))
        .with_state(state)
}
