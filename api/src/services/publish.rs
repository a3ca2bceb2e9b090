//! Publishing a tweet's generated article to WordPress

use crate::AppState;
use crate::constants::DEFAULT_POST_STATUS;
use crate::domain::twitter::{Article, Language, decode_media_urls};

use super::compose::compose_post_body;
use super::error::{ApiError, LogErr};
use super::media::upload_images;
use super::store::load_wordpress_credentials;
use super::wordpress::{NewPost, WordPressError};

/// A validated publish request
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub language: Language,
    pub published: bool,
    /// WordPress post status; blank means the default
    pub status: Option<String>,
}

impl PublishRequest {
    fn post_status(&self) -> String {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_POST_STATUS)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Unpublished,
    Published { post_id: i64, link: String },
}

/// Publish or unpublish one language of a tweet.
///
/// The publish flag is only set after WordPress confirmed the post; any
/// failure before that leaves the stored state as it was.
pub async fn publish_tweet(
    state: &AppState,
    id: i64,
    request: PublishRequest,
) -> Result<PublishOutcome, ApiError> {
    let language = request.language;

    let tweet = state
        .tweets
        .get(id)
        .await
        .log_500("Failed to load tweet")?
        .ok_or_else(|| ApiError::NotFound("Tweet not found".into()))?;

    if !request.published {
        state
            .tweets
            .update_published(id, language, false, None)
            .await
            .log_500("Failed to update publish status")?;

        tracing::info!(
            tweet_id = id,
            %language,
            previous_link = tweet.published_link(language),
            "Marked tweet as unpublished"
        );
        return Ok(PublishOutcome::Unpublished);
    }

    if tweet.is_published(language) {
        tracing::warn!(
            tweet_id = id,
            %language,
            previous_link = tweet.published_link(language),
            "Tweet already published, creating another post"
        );
    }

    let raw_article = tweet
        .article(language)
        .ok_or_else(|| ApiError::BadRequest(format!("Article not generated for {}", language)))?;

    let article = Article::decode(raw_article).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let media_urls = decode_media_urls(tweet.media_urls.as_deref());

    let site = load_wordpress_credentials(state.settings.as_ref(), language)
        .await
        .log_500("Failed to load WordPress settings")?
        .ok_or_else(|| {
            ApiError::NotConfigured(format!(
                "WordPress credentials for {} are not configured",
                language
            ))
        })?;

    let images = upload_images(&state.wordpress, &site, &media_urls).await;
    let (featured, gallery) = match images.split_first() {
        Some((first, rest)) => (Some(first.media_id), rest),
        None => (None, &images[..]),
    };

    let post = NewPost {
        title: article.title,
        content: compose_post_body(&article.body, gallery, &tweet.username, &tweet.source_url()),
        status: request.post_status(),
        featured_media: featured,
    };

    let created = state
        .wordpress
        .create_post(&site, &post)
        .await
        .map_err(|e| match e {
            WordPressError::Api { status, body } => {
                tracing::error!(tweet_id = id, %language, %status, %body, "WordPress rejected the post");
                ApiError::Upstream { status, body }
            }
            other => {
                tracing::error!(tweet_id = id, %language, error = %other, "Failed to create WordPress post");
                ApiError::internal("Failed to create WordPress post", other)
            }
        })?;

    if let Err(e) = state
        .tweets
        .update_published(id, language, true, Some(&created.link))
        .await
    {
        tracing::error!(
            tweet_id = id,
            %language,
            post_id = created.id,
            link = %created.link,
            error = %e,
            "WordPress post created but publish status was not saved"
        );
        return Err(ApiError::Unrecorded {
            post_id: created.id,
            link: created.link,
            detail: e.to_string(),
        });
    }

    tracing::info!(
        tweet_id = id,
        %language,
        post_id = created.id,
        images = images.len(),
        "Published tweet article to WordPress"
    );

    Ok(PublishOutcome::Published {
        post_id: created.id,
        link: created.link,
    })
}
