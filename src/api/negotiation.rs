//! Content negotiation for the REST resources
//!
//! Resources only produce JSON, so requests whose `Accept` header rules JSON
//! out are refused before reaching a handler.

use axum::{
    extract::Request,
    http::header::ACCEPT,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Middleware answering 406 when the client does not accept JSON
pub async fn require_json_accept(request: Request, next: Next) -> Result<Response, ApiError> {
    if let Some(accept) = request.headers().get(ACCEPT) {
        let accept = accept.to_str().map_err(|_| ApiError::NotAcceptable)?;
        if !accepts_json(accept) {
            return Err(ApiError::NotAcceptable);
        }
    }
    Ok(next.run(request).await)
}

/// Whether an `Accept` header value admits `application/json`
pub fn accepts_json(accept: &str) -> bool {
    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        let refused = parts.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        });

        !refused && matches!(media_type.as_str(), "application/json" | "application/*" | "*/*")
    })
}
