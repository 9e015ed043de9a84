//! HTTP-level middleware configuration.

use axum::http::{HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer from the environment.
///
/// The API is CORS-permitting by default: with no `CORS_ALLOWED_ORIGIN` set,
/// any origin may call it. Setting `CORS_ALLOWED_ORIGIN` to a comma-separated
/// origin list narrows it:
///
/// - Development: `CORS_ALLOWED_ORIGIN=http://localhost:3000,http://localhost:5173`
/// - Production: `CORS_ALLOWED_ORIGIN=https://example.com`
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but empty or contains an
/// invalid origin value.
pub fn cors_layer() -> io::Result<CorsLayer> {
    let Ok(origins_str) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        tracing::info!("CORS_ALLOWED_ORIGIN not set, CORS is permissive");
        return Ok(CorsLayer::permissive());
    };

    let allowed_origins = parse_origins(&origins_str)?;
    tracing::info!("CORS configured with allowed origins: {}", origins_str);

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

/// Parse a comma-separated origin list into header values.
fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_single() {
        let origins = parse_origins("http://localhost:3000").unwrap();
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0], "http://localhost:3000");
    }

    #[test]
    fn test_parse_origins_list_with_whitespace() {
        let origins = parse_origins(" http://localhost:3000 , https://example.com ").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_origins_empty_is_error() {
        assert!(parse_origins("").is_err());
        assert!(parse_origins(" , ").is_err());
    }

    #[test]
    fn test_parse_origins_invalid_value() {
        assert!(parse_origins("http://ok.example,bad\nvalue").is_err());
    }
}
