use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Per-request trace id, also stored in request extensions.
#[derive(Clone, Copy, Debug)]
pub struct TraceId(pub Uuid);

pub async fn logger<B>(mut req: Request<B>, next: Next<B>) -> Response {
    let trace_id = Uuid::new_v4();
    req.extensions_mut().insert(TraceId(trace_id));
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    // everything logged further down the stack carries the trace id
    let span = info_span!("request", trace_id = %trace_id, method = %method, uri = %uri);
    let response = next.run(req).instrument(span).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed().as_millis();
    info!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Request log");
    response
}
