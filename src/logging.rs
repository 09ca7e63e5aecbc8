//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// The number of bytes of a response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body) = request.into_parts();
    log_request(&headers);

    let request = Request::from_parts(headers, body);
    let response = next.run(request).await;

    let (headers, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Response::from_parts(headers, Body::empty());
        }
    };

    log_response(&headers, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(headers, Body::from(body_bytes))
}

fn log_request(headers: &request::Parts) {
    tracing::info!("Received request: {} {}", headers.method, headers.uri);
}

fn log_response(headers: &response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let mut end = LOG_BODY_LENGTH_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        tracing::info!("Sending response: {}\nbody: {}...", headers.status, &body[..end]);
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", headers.status);
    }
}
