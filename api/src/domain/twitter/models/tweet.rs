//! Tweet model definitions

use chrono::{DateTime, Utc};

use super::language::Language;

/// A stored tweet with its generated articles and per-language publish state
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tweet {
    pub id: i64,
    pub username: String,
    /// Identifier of the source tweet on X
    pub tweet_id: String,
    pub text: Option<String>,
    pub article_english: Option<String>,
    pub article_french: Option<String>,
    pub media_urls: Option<String>,
    pub published_english: bool,
    pub published_french: bool,
    pub published_link_english: Option<String>,
    pub published_link_french: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    /// Raw article column for a language, if one was generated
    pub fn article(&self, language: Language) -> Option<&str> {
        let raw = match language {
            Language::English => self.article_english.as_deref(),
            Language::French => self.article_french.as_deref(),
        };
        raw.filter(|s| !s.trim().is_empty())
    }

    pub fn is_published(&self, language: Language) -> bool {
        match language {
            Language::English => self.published_english,
            Language::French => self.published_french,
        }
    }

    pub fn published_link(&self, language: Language) -> Option<&str> {
        match language {
            Language::English => self.published_link_english.as_deref(),
            Language::French => self.published_link_french.as_deref(),
        }
    }

    /// Link back to the source tweet on X
    pub fn source_url(&self) -> String {
        format!("https://x.com/{}/status/{}", self.username, self.tweet_id)
    }
}
