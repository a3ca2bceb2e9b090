//! Store seams between handlers and persistence
//!
//! Handlers talk to `TweetStore` and `SettingsStore`; production wires the
//! Postgres implementations below, tests use the in-memory ones.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::domain::settings::{self, WordPressCredentials, wordpress_setting_keys};
use crate::domain::twitter::{Language, Tweet, tweets};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("tweet {0} no longer exists")]
    Missing(i64),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Persisted tweets and their publish state
#[async_trait]
pub trait TweetStore: Send + Sync {
    async fn count(&self) -> Result<i64, StoreError>;

    /// Delete every tweet, returning how many rows went away
    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Tweet>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Tweet>, StoreError>;

    async fn update_published(
        &self,
        id: i64,
        language: Language,
        published: bool,
        link: Option<&str>,
    ) -> Result<(), StoreError>;
}

/// Key/value settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Load the WordPress site configured for a language.
/// `Ok(None)` means at least one of the three settings is missing.
pub async fn load_wordpress_credentials(
    settings: &dyn SettingsStore,
    language: Language,
) -> Result<Option<WordPressCredentials>, StoreError> {
    let [url_key, username_key, password_key] = wordpress_setting_keys(language);

    let url = settings.get(&url_key).await?;
    let username = settings.get(&username_key).await?;
    let password = settings.get(&password_key).await?;

    Ok(WordPressCredentials::from_parts(url, username, password))
}

#[derive(Clone)]
pub struct PgTweetStore {
    db: PgPool,
}

impl PgTweetStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    async fn count(&self) -> Result<i64, StoreError> {
        Ok(tweets::count_tweets(&self.db).await?)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        Ok(tweets::delete_all_tweets(&self.db).await?)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Tweet>, StoreError> {
        Ok(tweets::list_tweets(&self.db, limit, offset).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Tweet>, StoreError> {
        Ok(tweets::get_tweet(&self.db, id).await?)
    }

    async fn update_published(
        &self,
        id: i64,
        language: Language,
        published: bool,
        link: Option<&str>,
    ) -> Result<(), StoreError> {
        let updated = tweets::update_published(&self.db, id, language, published, link).await?;
        if !updated {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSettingsStore {
    db: PgPool,
}

impl PgSettingsStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(settings::get_setting(&self.db, key).await?)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory stores for handler tests

    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, RwLock};

    /// A recorded `update_published` call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PublishUpdate {
        pub id: i64,
        pub language: Language,
        pub published: bool,
        pub link: Option<String>,
    }

    #[derive(Default)]
    pub struct InMemoryTweetStore {
        tweets: RwLock<BTreeMap<i64, Tweet>>,
        updates: Mutex<Vec<PublishUpdate>>,
        /// Every operation fails while set
        pub fail_all: AtomicBool,
        /// Only `update_published` fails while set
        pub fail_updates: AtomicBool,
    }

    impl InMemoryTweetStore {
        pub fn with_tweets(tweets: impl IntoIterator<Item = Tweet>) -> Self {
            let store = Self::default();
            store
                .tweets
                .write()
                .unwrap()
                .extend(tweets.into_iter().map(|t| (t.id, t)));
            store
        }

        pub fn updates(&self) -> Vec<PublishUpdate> {
            self.updates.lock().unwrap().clone()
        }

        pub fn snapshot(&self, id: i64) -> Option<Tweet> {
            self.tweets.read().unwrap().get(&id).cloned()
        }

        pub fn remove(&self, id: i64) -> Option<Tweet> {
            self.tweets.write().unwrap().remove(&id)
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(StoreError::Database("store unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TweetStore for InMemoryTweetStore {
        async fn count(&self) -> Result<i64, StoreError> {
            self.check()?;
            Ok(self.tweets.read().unwrap().len() as i64)
        }

        async fn delete_all(&self) -> Result<u64, StoreError> {
            self.check()?;
            let mut tweets = self.tweets.write().unwrap();
            let removed = tweets.len() as u64;
            tweets.clear();
            Ok(removed)
        }

        async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Tweet>, StoreError> {
            self.check()?;
            Ok(self
                .tweets
                .read()
                .unwrap()
                .values()
                .rev()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn get(&self, id: i64) -> Result<Option<Tweet>, StoreError> {
            self.check()?;
            Ok(self.snapshot(id))
        }

        async fn update_published(
            &self,
            id: i64,
            language: Language,
            published: bool,
            link: Option<&str>,
        ) -> Result<(), StoreError> {
            self.check()?;
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(StoreError::Database("update rejected".into()));
            }

            let mut tweets = self.tweets.write().unwrap();
            let tweet = tweets.get_mut(&id).ok_or(StoreError::Missing(id))?;

            self.updates.lock().unwrap().push(PublishUpdate {
                id,
                language,
                published,
                link: link.map(str::to_owned),
            });

            let link = link.map(str::to_owned);
            match language {
                Language::English => {
                    tweet.published_english = published;
                    tweet.published_link_english = link;
                }
                Language::French => {
                    tweet.published_french = published;
                    tweet.published_link_french = link;
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemorySettingsStore {
        values: RwLock<HashMap<String, String>>,
    }

    impl InMemorySettingsStore {
        pub fn set(&self, key: &str, value: &str) {
            self.values
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        /// Configure the WordPress site for a language
        pub fn set_wordpress(&self, language: Language, url: &str) {
            let [url_key, username_key, password_key] = wordpress_setting_keys(language);
            self.set(&url_key, url);
            self.set(&username_key, "editor");
            self.set(&password_key, "app-password");
        }
    }

    #[async_trait]
    impl SettingsStore for InMemorySettingsStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.values.read().unwrap().get(key).cloned())
        }
    }
}
