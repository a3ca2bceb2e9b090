//! Generated article decoding

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleError {
    #[error("Invalid article data format")]
    InvalidFormat,
    #[error("Article is missing a title or content")]
    MissingFields,
}

#[derive(Deserialize)]
struct RawArticle {
    title: Option<String>,
    article: Option<String>,
    content: Option<String>,
}

/// A generated article ready to be rendered and published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    /// Markdown body
    pub body: String,
}

impl Article {
    /// Decode a stored article column.
    ///
    /// The column holds a JSON object `{title, article | content}`. Some rows
    /// were written double-encoded (a JSON string containing the object), so
    /// one level of string wrapping is unwrapped first.
    pub fn decode(raw: &str) -> Result<Self, ArticleError> {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(inner)) => {
                serde_json::from_str::<Value>(&inner).map_err(|_| ArticleError::InvalidFormat)?
            }
            Ok(value) => value,
            Err(_) => return Err(ArticleError::InvalidFormat),
        };

        if !value.is_object() {
            return Err(ArticleError::InvalidFormat);
        }

        let raw: RawArticle = serde_json::from_value(value).map_err(|_| ArticleError::InvalidFormat)?;

        let title = non_blank(raw.title).ok_or(ArticleError::MissingFields)?;
        let body = non_blank(raw.article)
            .or_else(|| non_blank(raw.content))
            .ok_or(ArticleError::MissingFields)?;

        Ok(Article { title, body })
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
