use serde::{Deserialize, Serialize};
use sqlx::{Pool, Row as _};
use tracing::debug;

use crate::{Batch, ChosenRow, Error, ListingParams, author::Author, error::Result};

/// Fully normalized payload: text fields are already sanitized and the slug
/// already derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
    pub author_id: i64,
}

/// Partial patch, only the supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub author_id: Option<i64>,
}

impl NewsPatch {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.published.is_none()
            && self.author_id.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
    pub author_id: i64,
    pub author: Author,
}

impl sqlx::FromRow<'_, ChosenRow> for News {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        let author = Author {
            id: row.try_get("author_id")?,
            name: row.try_get("author_name")?,
            email: row.try_get("author_email")?,
        };
        Ok(News {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            excerpt: row.try_get("excerpt")?,
            content: row.try_get("content")?,
            published: row.try_get("published")?,
            author_id: author.id,
            author,
        })
    }
}

pub type NewsRepository = NewsRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct NewsRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> NewsRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Best effort pre-check; the foreign key remains the final authority.
    async fn author_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM author WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        Ok(found.is_some())
    }

    pub async fn create(&self, payload: CreateNews) -> Result<News> {
        if !self.author_exists(payload.author_id).await? {
            return Err(Error::AuthorNotFound(payload.author_id));
        }

        let result = sqlx::query(
            "INSERT INTO news (slug, title, excerpt, content, published, author_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.slug)
        .bind(&payload.title)
        .bind(&payload.excerpt)
        .bind(&payload.content)
        .bind(payload.published)
        .bind(payload.author_id)
        .execute(&self.executor)
        .await
        .map_err(|e| Error::on_unique(e, "slug"))?;

        let id = result.last_insert_rowid();
        self.get(id).await
    }

    pub async fn update(&self, slug: &str, patch: NewsPatch) -> Result<News> {
        let id: i64 = sqlx::query_scalar("SELECT id FROM news WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("News".to_string()))?;

        if let Some(author_id) = patch.author_id {
            if !self.author_exists(author_id).await? {
                return Err(Error::AuthorNotFound(author_id));
            }
        }

        if patch.is_empty() {
            debug!("Empty patch for news {slug}");
            return self.get(id).await;
        }

        const SQL: &str = "UPDATE news SET
            slug = COALESCE(?, slug),
            title = COALESCE(?, title),
            excerpt = COALESCE(?, excerpt),
            content = COALESCE(?, content),
            published = COALESCE(?, published),
            author_id = COALESCE(?, author_id)
         WHERE id = ?";

        sqlx::query(SQL)
            .bind(&patch.slug)
            .bind(&patch.title)
            .bind(&patch.excerpt)
            .bind(&patch.content)
            .bind(patch.published)
            .bind(patch.author_id)
            .bind(id)
            .execute(&self.executor)
            .await
            .map_err(|e| Error::on_unique(e, "slug"))?;

        self.get(id).await
    }

    /// Create or update keyed by the unique slug, used by seeding.
    pub async fn upsert(&self, payload: CreateNews) -> Result<News> {
        if !self.author_exists(payload.author_id).await? {
            return Err(Error::AuthorNotFound(payload.author_id));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO news (slug, title, excerpt, content, published, author_id)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (slug) DO UPDATE SET
                title = excluded.title,
                excerpt = excluded.excerpt,
                content = excluded.content,
                published = excluded.published,
                author_id = excluded.author_id
             RETURNING id",
        )
        .bind(&payload.slug)
        .bind(&payload.title)
        .bind(&payload.excerpt)
        .bind(&payload.content)
        .bind(payload.published)
        .bind(payload.author_id)
        .fetch_one(&self.executor)
        .await?;
        self.get(id).await
    }

    pub async fn list(&self, params: ListingParams) -> Result<Batch<News>> {
        const SQL: &str = "SELECT n.id, n.slug, n.title, n.excerpt, n.content, n.published,
                n.author_id, a.name AS author_name, a.email AS author_email
         FROM news n
         JOIN author a ON n.author_id = a.id
         ORDER BY n.id DESC
         LIMIT ? OFFSET ?";

        let rows = sqlx::query_as::<_, News>(SQL)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.executor)
            .await?;
        let total = self.count().await?;
        Ok(Batch {
            offset: params.offset,
            total,
            rows,
        })
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM news")
            .fetch_one(&self.executor)
            .await?;
        Ok(total)
    }

    pub async fn get(&self, id: i64) -> Result<News> {
        const SQL: &str = "SELECT n.id, n.slug, n.title, n.excerpt, n.content, n.published,
                n.author_id, a.name AS author_name, a.email AS author_email
         FROM news n
         JOIN author a ON n.author_id = a.id
         WHERE n.id = ?";

        sqlx::query_as::<_, News>(SQL)
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("News".to_string()))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<News> {
        const SQL: &str = "SELECT n.id, n.slug, n.title, n.excerpt, n.content, n.published,
                n.author_id, a.name AS author_name, a.email AS author_email
         FROM news n
         JOIN author a ON n.author_id = a.id
         WHERE n.slug = ?";

        sqlx::query_as::<_, News>(SQL)
            .bind(slug)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("News".to_string()))
    }

    pub async fn delete(&self, slug: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM news WHERE slug = ?")
            .bind(slug)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("News".to_string()))
        } else {
            Ok(())
        }
    }
}
