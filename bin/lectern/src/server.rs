//! HTTP surface for the publication feed.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use lectern_generator::{ContentProvider, FEED_CONTENT_TYPE, FeedGenerator};
use tower_http::trace::TraceLayer;

/// State shared by the feed handler.
#[derive(Clone)]
pub struct FeedState {
    pub generator: Arc<FeedGenerator>,
    pub provider: Arc<dyn ContentProvider>,
}

impl FeedState {
    pub fn new(generator: FeedGenerator, provider: impl ContentProvider + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
            provider: Arc::new(provider),
        }
    }
}

/// Create the router serving the feed at `route`.
pub fn create_router(route: &str, state: FeedState) -> Router {
    Router::new()
        .route(route, get(feed_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rebuild the feed from the current content on every request.
async fn feed_handler(State(state): State<FeedState>) -> Response {
    let FeedState {
        generator,
        provider,
    } = state;

    // Collection loading reads the filesystem.
    let rendered =
        tokio::task::spawn_blocking(move || generator.render(provider.as_ref())).await;

    match rendered {
        Ok(Ok(xml)) => ([(header::CONTENT_TYPE, FEED_CONTENT_TYPE)], xml).into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "feed generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to generate feed: {e}"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "feed task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate feed".to_string(),
            )
                .into_response()
        }
    }
}
