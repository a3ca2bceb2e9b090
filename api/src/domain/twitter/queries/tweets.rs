//! Tweet domain - DB queries for tweets
//!
//! All functions use the generic Executor pattern, allowing them to work with
//! both `&PgPool` (for standalone queries) and `&mut PgConnection` (for transactions).

use sqlx::{Executor, Postgres};

use super::super::models::{Language, Tweet};

const TWEET_COLUMNS: &str = r#"id, username, tweet_id, text, article_english, article_french,
       media_urls, published_english, published_french,
       published_link_english, published_link_french, created_at"#;

/// Count all stored tweets
pub async fn count_tweets<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tweets")
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// Delete every stored tweet, returning the number of rows removed
pub async fn delete_all_tweets<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM tweets").execute(executor).await?;

    Ok(result.rows_affected())
}

/// List tweets, newest first
pub async fn list_tweets<'e, E>(
    executor: E,
    limit: i64,
    offset: i64,
) -> Result<Vec<Tweet>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let query = format!(
        "SELECT {} FROM tweets ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        TWEET_COLUMNS
    );

    sqlx::query_as(&query)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
}

/// Get a tweet by ID
pub async fn get_tweet<'e, E>(executor: E, id: i64) -> Result<Option<Tweet>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let query = format!("SELECT {} FROM tweets WHERE id = $1", TWEET_COLUMNS);

    sqlx::query_as(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Set the publish flag and link for one language.
/// Returns true if a row was updated.
pub async fn update_published<'e, E>(
    executor: E,
    id: i64,
    language: Language,
    published: bool,
    link: Option<&str>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let query = match language {
        Language::English => {
            "UPDATE tweets SET published_english = $1, published_link_english = $2 WHERE id = $3"
        }
        Language::French => {
            "UPDATE tweets SET published_french = $1, published_link_french = $2 WHERE id = $3"
        }
    };

    let result = sqlx::query(query)
        .bind(published)
        .bind(link)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
