//! Settings domain - key/value settings and the WordPress credentials kept in them

use sqlx::{Executor, Postgres};

use super::twitter::Language;

/// Get a single setting value by key
pub async fn get_setting<'e, E>(executor: E, key: &str) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<(Option<String>,)> = sqlx::query_as("SELECT value FROM settings WHERE key = $1")
        .bind(key)
        .fetch_optional(executor)
        .await?;

    Ok(row.and_then(|(value,)| value))
}

/// Settings keys holding the WordPress site for a language
pub fn wordpress_setting_keys(language: Language) -> [String; 3] {
    ["url", "username", "password"].map(|field| format!("wordpress_{}_{}", language, field))
}

/// Credentials for one WordPress site
#[derive(Clone, PartialEq, Eq)]
pub struct WordPressCredentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl WordPressCredentials {
    /// Build credentials from raw setting values; blank values count as missing.
    pub fn from_parts(
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Some(Self {
            url: present(url)?.trim_end_matches('/').to_string(),
            username: present(username)?,
            password: present(password)?,
        })
    }

    /// Absolute URL of a `wp/v2` REST route, e.g. `endpoint("posts")`
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.url, route)
    }
}

impl std::fmt::Debug for WordPressCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPressCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
