use axum::{
    routing::get,
    Router,
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::time::{Duration, Instant};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{Result, AppError};
use crate::api::models::ArticleQuery;
use crate::api::response;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/articles", get(articles_handler))
        .route("/api/articles/top", get(top_articles_handler))
        .route("/api/article", get(article_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Applies the handler-wide timeout, if one is configured.
async fn with_timeout<T>(limit: Option<Duration>, work: impl Future<Output = Result<T>>) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| AppError::Timeout)?,
        None => work.await,
    }
}

fn log_failure(endpoint: &str, err: &AppError) {
    match err {
        AppError::ValidationError(details) => {
            error!(endpoint, fields = details.len(), "model output failed validation")
        }
        other => error!(endpoint, error = %other, "request failed"),
    }
}

async fn health_handler() -> impl IntoResponse {
    response::health()
}

async fn articles_handler(State(state): State<AppState>) -> Response {
    let start_time = Instant::now();
    let result = with_timeout(state.request_timeout, state.pipeline.crawl_articles_list()).await;
    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "article list request finished");

    match result {
        Ok(list) => response::success(list).into_response(),
        Err(err) => {
            log_failure("/api/articles", &err);
            err.into_server_error()
        }
    }
}

async fn top_articles_handler(State(state): State<AppState>) -> Response {
    let start_time = Instant::now();
    let result = with_timeout(
        state.request_timeout,
        state.cache.get_or_populate(&state.pipeline),
    )
    .await;
    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "top articles request finished");

    match result {
        Ok(articles) => response::success(articles).into_response(),
        Err(err) => {
            log_failure("/api/articles/top", &err);
            err.into_response()
        }
    }
}

async fn article_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ArticleQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return AppError::InvalidQuery(rejection.body_text()).into_response(),
    };
    let Some(url) = query.url() else {
        return AppError::MissingParameter("url").into_response();
    };

    info!(url, "processing article request");
    let start_time = Instant::now();
    let result = with_timeout(state.request_timeout, state.pipeline.crawl_article(url)).await;
    info!(url, elapsed_ms = start_time.elapsed().as_millis() as u64, "article request finished");

    match result {
        Ok(article) => response::success(article).into_response(),
        Err(err) => {
            log_failure("/api/article", &err);
            err.into_response()
        }
    }
}
