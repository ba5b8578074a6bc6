//! Request tracing middleware.
//!
//! Wraps every request in an `api_request` span and logs its outcome.

use axum::{body::Body, http::Request, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{debug, info_span, warn, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Take the readied service and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let parent_context = extract_trace_context(&req);

        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let span = info_span!(
            "api_request",
            http.method = %method,
            http.target = %path,
            http.status_code = tracing::field::Empty,
            otel.kind = "server",
            otel.status_code = tracing::field::Empty,
        );

        if let Some(parent) = parent_context {
            span.follows_from(parent);
        }

        Box::pin(
            async move {
                let started = Instant::now();
                let result = inner.call(req).await;
                let elapsed_ms = started.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        let span = Span::current();
                        span.record("http.status_code", status.as_u16());
                        span.record(
                            "otel.status_code",
                            if status.is_server_error() { "ERROR" } else { "OK" },
                        );
                        if status.is_server_error() {
                            warn!(status = status.as_u16(), elapsed_ms, "request failed");
                        } else {
                            debug!(status = status.as_u16(), elapsed_ms, "request completed");
                        }
                    }
                    Err(_) => {
                        Span::current().record("otel.status_code", "ERROR");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Extract trace context from request headers (W3C Trace Context)
fn extract_trace_context<B>(req: &Request<B>) -> Option<Span> {
    let traceparent = req.headers().get("traceparent")?.to_str().ok()?;

    // version-trace_id-parent_id-trace_flags
    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() != 4 {
        return None;
    }

    Some(info_span!(
        "parent_trace",
        trace_id = parts[1],
        parent_span_id = parts[2]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[test]
    fn test_traceparent_parsing() {
        let req = Request::builder()
            .header(
                "traceparent",
                "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
            )
            .body(Body::empty())
            .unwrap();

        assert!(extract_trace_context(&req).is_some());
    }

    #[test]
    fn test_invalid_traceparent() {
        let req = Request::builder()
            .header("traceparent", "invalid")
            .body(Body::empty())
            .unwrap();

        assert!(extract_trace_context(&req).is_none());
    }

    #[test]
    fn test_no_traceparent() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_trace_context(&req).is_none());
    }

    #[tokio::test]
    async fn test_layer_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(TracingLayer::new());

        let response = app
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
