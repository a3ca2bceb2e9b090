//! WordPress REST API client

use base64::Engine;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{IMAGE_DOWNLOAD_TIMEOUT, WORDPRESS_REQUEST_TIMEOUT};
use crate::domain::settings::WordPressCredentials;

#[derive(Debug, Error)]
pub enum WordPressError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WordPress API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
    #[error("Image host returned {status}")]
    Download { status: StatusCode },
    #[error("Unexpected WordPress response: {0}")]
    InvalidResponse(String),
}

/// An image fetched from its source host
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub data: Bytes,
    pub content_type: String,
}

/// A file stored in the WordPress media library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub media_id: i64,
    pub url: String,
}

/// Body of `POST /wp/v2/posts`
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: i64,
    pub link: String,
}

#[derive(Deserialize)]
struct MediaResponse {
    id: Option<i64>,
    source_url: Option<String>,
    guid: Option<RenderedField>,
    link: Option<String>,
}

#[derive(Deserialize)]
struct RenderedField {
    rendered: Option<String>,
}

impl MediaResponse {
    fn into_uploaded(self) -> Option<UploadedImage> {
        let url = self
            .source_url
            .or_else(|| self.guid.and_then(|g| g.rendered))
            .or(self.link)
            .filter(|u| !u.is_empty())?;

        Some(UploadedImage {
            media_id: self.id?,
            url,
        })
    }
}

#[derive(Clone)]
pub struct WordPressClient {
    http: Client,
}

impl Default for WordPressClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WordPressClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Build Basic auth header for an application password
    fn basic_auth_header(site: &WordPressCredentials) -> String {
        let credentials = format!("{}:{}", site.username, site.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// Fetch an image from anywhere on the web
    pub async fn download_image(&self, url: &str) -> Result<DownloadedImage, WordPressError> {
        let resp = self
            .http
            .get(url)
            .timeout(IMAGE_DOWNLOAD_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WordPressError::Download { status });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "image/jpeg".to_string());

        let data = resp.bytes().await?;

        Ok(DownloadedImage { data, content_type })
    }

    /// Upload a file to the media library
    pub async fn upload_media(
        &self,
        site: &WordPressCredentials,
        image: DownloadedImage,
        filename: &str,
    ) -> Result<UploadedImage, WordPressError> {
        let part = reqwest::multipart::Part::bytes(image.data.to_vec())
            .file_name(filename.to_string())
            .mime_str(&image.content_type)
            .map_err(|e| WordPressError::InvalidResponse(format!("Invalid mime type: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(site.endpoint("media"))
            .header("Authorization", Self::basic_auth_header(site))
            .timeout(WORDPRESS_REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::CREATED {
            return Err(WordPressError::Api { status, body: text });
        }

        let media: MediaResponse = serde_json::from_str(&text).map_err(|e| {
            WordPressError::InvalidResponse(format!("Failed to parse media response: {} - body: {}", e, text))
        })?;

        media
            .into_uploaded()
            .ok_or_else(|| WordPressError::InvalidResponse(format!("Media response missing id or url: {}", text)))
    }

    /// Create a post. Only `201 Created` counts as success.
    pub async fn create_post(
        &self,
        site: &WordPressCredentials,
        post: &NewPost,
    ) -> Result<CreatedPost, WordPressError> {
        let resp = self
            .http
            .post(site.endpoint("posts"))
            .header("Authorization", Self::basic_auth_header(site))
            .timeout(WORDPRESS_REQUEST_TIMEOUT)
            .json(post)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::CREATED {
            return Err(WordPressError::Api { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| {
            WordPressError::InvalidResponse(format!("Failed to parse post response: {} - body: {}", e, text))
        })
    }
}
