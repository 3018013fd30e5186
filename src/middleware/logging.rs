//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// How a finished request is reported
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Outcome::ServerError
        } else if status.is_client_error()
            && status != StatusCode::NOT_FOUND
            && status != StatusCode::UNAUTHORIZED
        {
            Outcome::ClientError
        } else {
            Outcome::Ok
        }
    }
}

/// Log method, path, status and latency of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match Outcome::of(status) {
        Outcome::ServerError => warn!(
            %method, %path, status = status.as_u16(), %duration_ms,
            "Request failed"
        ),
        Outcome::ClientError => warn!(
            %method, %path, status = status.as_u16(), %duration_ms,
            "Request rejected"
        ),
        Outcome::Ok => info!(
            %method, %path, status = status.as_u16(), %duration_ms,
            "Request completed"
        ),
    }

    response
}
