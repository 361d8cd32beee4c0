use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::DigestConfig;
use crate::ingest::{self, fetch::FeedFetcher};
use crate::registry::SourceDescriptor;

pub const NEWS_PATH: &str = "/api/news";

#[derive(Clone)]
pub struct AppState {
    pub sources: Arc<Vec<SourceDescriptor>>,
    pub fetcher: Arc<dyn FeedFetcher>,
    pub config: Arc<DigestConfig>,
}

impl AppState {
    pub fn new(
        sources: Vec<SourceDescriptor>,
        fetcher: Arc<dyn FeedFetcher>,
        config: DigestConfig,
    ) -> Self {
        Self {
            sources: Arc::new(sources),
            fetcher,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cache_control = HeaderValue::from_str(&state.config.cache_control())
        .unwrap_or_else(|_| HeaderValue::from_static("s-maxage=300, stale-while-revalidate=600"));

    // CORS + CDN caching headers go on every digest response, preflight included.
    let news = Router::new()
        .route(NEWS_PATH, any(news_digest))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            cache_control,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(news)
        .with_state(state)
}

// OPTIONS is a bare 200; every other method gets the digest.
async fn news_digest(method: Method, State(state): State<AppState>) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    let digest = ingest::aggregate(&state.sources, Arc::clone(&state.fetcher), &state.config).await;
    (StatusCode::OK, Json(digest)).into_response()
}
