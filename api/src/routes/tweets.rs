//! Tweet endpoints (/tweets/*)

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use super::dto::{DeleteAllResponse, PublishBody, PublishResponse, TweetResponse};
use crate::AppState;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::twitter::Language;
use crate::services::error::{ApiError, LogErr};
use crate::services::publish::{self, PublishOutcome, PublishRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tweets", get(list_tweets).delete(delete_all_tweets))
        .route("/tweets/{id}/publish", post(publish_tweet))
}

#[derive(Deserialize)]
struct ListTweetsQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(serde::Serialize)]
struct ListTweetsResponse {
    tweets: Vec<TweetResponse>,
    total: i64,
    has_more: bool,
}

/// GET /tweets - List stored tweets with pagination
async fn list_tweets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTweetsQuery>,
) -> Result<Json<ListTweetsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let total = state.tweets.count().await.log_500("Failed to count tweets")?;

    let result = state
        .tweets
        .list(limit, offset)
        .await
        .log_500("Failed to list tweets")?;

    let has_more = offset + (result.len() as i64) < total;

    Ok(Json(ListTweetsResponse {
        tweets: result.into_iter().map(TweetResponse::from).collect(),
        total,
        has_more,
    }))
}

/// DELETE /tweets - Delete every stored tweet
async fn delete_all_tweets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let count = state
        .tweets
        .count()
        .await
        .log_500("Failed to delete tweets")?;

    state
        .tweets
        .delete_all()
        .await
        .log_500("Failed to delete tweets")?;

    tracing::info!(deleted = count, "Deleted all tweets");

    Ok(Json(DeleteAllResponse {
        success: true,
        deleted_count: count,
        message: format!("Successfully deleted {} tweets", count),
    }))
}

/// POST /tweets/:id/publish - Publish (or unpublish) a tweet's article to WordPress
///
/// The body is read raw so the id is validated before the body is looked at.
async fn publish_tweet(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<PublishResponse>, ApiError> {
    let id = raw_id
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::BadRequest("Invalid tweet ID".into()))?;

    let body: PublishBody = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid request body".into()))?;

    let language = body
        .language
        .as_str()
        .and_then(Language::parse)
        .ok_or_else(|| {
            ApiError::BadRequest("Invalid language. Must be 'english' or 'french'".into())
        })?;

    let request = PublishRequest {
        language,
        published: body.published,
        status: body.status,
    };

    let response = match publish::publish_tweet(&state, id, request).await? {
        PublishOutcome::Unpublished => PublishResponse {
            success: true,
            post_id: None,
            link: None,
            message: format!("Tweet marked as unpublished for {}", language),
        },
        PublishOutcome::Published { post_id, link } => PublishResponse {
            success: true,
            post_id: Some(post_id),
            link: Some(link),
            message: format!("Article published to WordPress ({})", language),
        },
    };

    Ok(Json(response))
}
