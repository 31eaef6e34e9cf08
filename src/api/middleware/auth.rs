use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::api::error::ApiError;

/// Extract and validate Bearer token from Authorization header
pub fn validate_auth(headers: &HeaderMap, secret_key: &str) -> Result<(), ApiError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    // Expected format: "Bearer <token>"
    let parts: Vec<&str> = auth_header.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(ApiError::unauthorized(
            "Invalid authorization header format. Expected: Bearer <token>",
        ));
    }

    if !tokens_match(parts[1].as_bytes(), secret_key.as_bytes()) {
        return Err(ApiError::unauthorized("Invalid authentication token"));
    }

    Ok(())
}

/// Compares every byte regardless of where the first mismatch is.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

pub async fn require_admin_token(
    secret_key: String,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    validate_auth(req.headers(), &secret_key)?;
    Ok(next.run(req).await)
}
