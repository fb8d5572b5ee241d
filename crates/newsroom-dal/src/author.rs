use garde::Validate;
use newsroom_types::general::ValidEmail;
use serde::{Deserialize, Serialize};
use sqlx::Pool;

use crate::{Batch, Error, ListingParams, error::Result};

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateAuthor {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(dive)]
    pub email: ValidEmail,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}

pub type AuthorRepository = AuthorRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct AuthorRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> AuthorRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateAuthor) -> Result<Author> {
        let result = sqlx::query("INSERT INTO author (name, email) VALUES (?, ?)")
            .bind(&payload.name)
            .bind(payload.email.as_ref())
            .execute(&self.executor)
            .await
            .map_err(|e| Error::on_unique(e, "email"))?;

        let id = result.last_insert_rowid();
        self.get(id).await
    }

    /// Full replace of the mutable fields.
    pub async fn update(&self, id: i64, payload: CreateAuthor) -> Result<Author> {
        let result = sqlx::query("UPDATE author SET name = ?, email = ? WHERE id = ?")
            .bind(&payload.name)
            .bind(payload.email.as_ref())
            .bind(id)
            .execute(&self.executor)
            .await
            .map_err(|e| Error::on_unique(e, "email"))?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound("Author".to_string()))
        } else {
            self.get(id).await
        }
    }

    /// Create or update keyed by the unique email, used by seeding.
    pub async fn upsert(&self, payload: CreateAuthor) -> Result<Author> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO author (name, email) VALUES (?, ?)
             ON CONFLICT (email) DO UPDATE SET name = excluded.name
             RETURNING id",
        )
        .bind(&payload.name)
        .bind(payload.email.as_ref())
        .fetch_one(&self.executor)
        .await?;
        self.get(id).await
    }

    pub async fn list(&self, params: ListingParams) -> Result<Batch<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, email FROM author ORDER BY id DESC LIMIT ? OFFSET ?",
        )
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
        let total: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM author")
            .fetch_one(&self.executor)
            .await?;
        Ok(total)
    }

    pub async fn get(&self, id: i64) -> Result<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name, email FROM author WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Author".to_string()))
    }

    /// Deletion is refused by the foreign key while news still reference the
    /// author; the constraint violation is surfaced as [Error::AuthorInUse].
    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => Error::AuthorInUse(id),
                _ => Error::Database(e),
            })?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Author".to_string()))
        } else {
            Ok(())
        }
    }
}
