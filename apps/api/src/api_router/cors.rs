use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use parentmanager_core::AppError;
use tower_http::cors::CorsLayer;

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::build_cors_layer;

    #[test]
    fn rejects_frontend_url_with_control_characters() {
        assert!(build_cors_layer("http://localhost:3000").is_ok());
        assert!(build_cors_layer("http://localhost:3000\n").is_err());
    }
}
