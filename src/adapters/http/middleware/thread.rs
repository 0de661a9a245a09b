//! Thread identity middleware and extractor for axum.
//!
//! This module provides:
//! - `thread_middleware` - resolves the request's thread id and echoes it back
//! - `ThreadContext` - extractor handing the resolved id to handlers
//!
//! ```text
//! Request → thread_middleware → injects ThreadContext into extensions
//!                                      ↓
//!                              Handler → ThreadContext extractor reads it
//!                                      ↓
//! Response ← x-thread-id header set from the same ThreadContext
//! ```
//!
//! A request without an `x-thread-id` header, or with one that is not a valid
//! thread id, starts a new thread.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::domain::foundation::ThreadId;

/// Header carrying the thread id in both directions.
pub const THREAD_ID_HEADER: HeaderName = HeaderName::from_static("x-thread-id");

/// The thread a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadContext {
    pub thread_id: ThreadId,
    /// True when the id was minted for this request.
    pub minted: bool,
}

impl ThreadContext {
    fn minted() -> Self {
        Self {
            thread_id: ThreadId::generate(),
            minted: true,
        }
    }

    /// Resolves the thread from a raw header value.
    pub fn from_header(value: Option<&HeaderValue>) -> Self {
        let supplied = value
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match supplied.map(ThreadId::new) {
            Some(Ok(thread_id)) => Self {
                thread_id,
                minted: false,
            },
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Ignoring invalid thread id header");
                Self::minted()
            }
            None => Self::minted(),
        }
    }
}

/// Resolves the thread id, stores it in request extensions, and sets the
/// `x-thread-id` response header.
pub async fn thread_middleware(mut request: Request, next: Next) -> Response {
    let context = ThreadContext::from_header(request.headers().get(&THREAD_ID_HEADER));
    let header = HeaderValue::from_str(context.thread_id.as_str()).ok();

    request.extensions_mut().insert(context);
    let mut response = next.run(request).await;

    if let Some(value) = header {
        response.headers_mut().insert(THREAD_ID_HEADER, value);
    }
    response
}

#[async_trait]
impl<S> FromRequestParts<S> for ThreadContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ThreadContext>()
            .cloned()
            .unwrap_or_else(|| ThreadContext::from_header(parts.headers.get(&THREAD_ID_HEADER))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_header_is_used() {
        let value = HeaderValue::from_static("thrd_abc");
        let context = ThreadContext::from_header(Some(&value));

        assert_eq!(context.thread_id.as_str(), "thrd_abc");
        assert!(!context.minted);
    }

    #[test]
    fn missing_header_mints_new_thread() {
        let context = ThreadContext::from_header(None);

        assert!(context.minted);
        assert!(context.thread_id.as_str().starts_with("thrd_"));
    }

    #[test]
    fn invalid_header_mints_new_thread() {
        let value = HeaderValue::from_static("not valid!");
        let context = ThreadContext::from_header(Some(&value));

        assert!(context.minted);
    }

    #[test]
    fn blank_header_mints_new_thread() {
        let value = HeaderValue::from_static("   ");
        assert!(ThreadContext::from_header(Some(&value)).minted);
    }
}
