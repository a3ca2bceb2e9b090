//! API request/response DTOs for tweet endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::twitter::{Language, Tweet, decode_media_urls};

/// Tweet API response
#[derive(Debug, Clone, Serialize)]
pub struct TweetResponse {
    pub id: i64,
    pub username: String,
    pub tweet_id: String,
    pub text: Option<String>,
    pub has_article_english: bool,
    pub has_article_french: bool,
    pub media_urls: Vec<String>,
    pub published_english: bool,
    pub published_french: bool,
    pub published_link_english: Option<String>,
    pub published_link_french: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Tweet> for TweetResponse {
    fn from(t: Tweet) -> Self {
        Self {
            has_article_english: t.article(Language::English).is_some(),
            has_article_french: t.article(Language::French).is_some(),
            media_urls: decode_media_urls(t.media_urls.as_deref()),
            id: t.id,
            username: t.username,
            tweet_id: t.tweet_id,
            text: t.text,
            published_english: t.published_english,
            published_french: t.published_french,
            published_link_english: t.published_link_english,
            published_link_french: t.published_link_french,
            created_at: t.created_at,
        }
    }
}

/// Body of `POST /tweets/{id}/publish`
#[derive(Debug, Deserialize)]
pub struct PublishBody {
    #[serde(default)]
    pub language: serde_json::Value,
    pub published: bool,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub success: bool,
    pub deleted_count: i64,
    pub message: String,
}
