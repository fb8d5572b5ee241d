use garde::Validate;
use newsroom_dal::news::{CreateNews, NewsPatch, NewsRepository};
use newsroom_types::utils::text::{sanitize, slugify};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
#[allow(unused_imports)]
use axum::routing::{delete, get, post, put};

crate::repository_from_request!(NewsRepository);

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[garde(length(min = 1, max = 200))]
    title: String,
    #[garde(length(min = 1, max = 500))]
    excerpt: String,
    #[garde(length(min = 1))]
    content: String,
    #[garde(range(min = 1))]
    author_id: i64,
    #[garde(skip)]
    published: Option<bool>,
    #[garde(inner(length(min = 1, max = 200)))]
    slug: Option<String>,
}

impl CreateNewsRequest {
    fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.excerpt = self.excerpt.trim().to_string();
        self.content = self.content.trim().to_string();
        self.slug = self.slug.map(|s| s.trim().to_string());
        self
    }

    /// Sanitizes the text fields and derives the slug, either from the
    /// supplied one or from the sanitized title.
    fn into_payload(self) -> ApiResult<CreateNews> {
        let title = sanitize(&self.title);
        let excerpt = sanitize(&self.excerpt);
        let content = sanitize(&self.content);
        let slug = match &self.slug {
            Some(slug) => slugify(slug),
            None => slugify(&title),
        };
        if slug.is_empty() {
            return Err(empty_slug());
        }
        Ok(CreateNews {
            slug,
            title,
            excerpt,
            content,
            published: self.published.unwrap_or(false),
            author_id: self.author_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateNewsRequest {
    #[garde(inner(length(min = 1, max = 200)))]
    title: Option<String>,
    #[garde(inner(length(min = 1, max = 500)))]
    excerpt: Option<String>,
    #[garde(inner(length(min = 1)))]
    content: Option<String>,
    #[garde(inner(range(min = 1)))]
    author_id: Option<i64>,
    #[garde(skip)]
    published: Option<bool>,
    #[garde(inner(length(min = 1, max = 200)))]
    slug: Option<String>,
}

impl UpdateNewsRequest {
    fn trimmed(mut self) -> Self {
        self.title = self.title.map(|s| s.trim().to_string());
        self.excerpt = self.excerpt.map(|s| s.trim().to_string());
        self.content = self.content.map(|s| s.trim().to_string());
        self.slug = self.slug.map(|s| s.trim().to_string());
        self
    }

    /// Only the supplied fields make it into the patch, each sanitized or
    /// re-slugified independently.
    fn into_patch(self) -> ApiResult<NewsPatch> {
        let slug = match self.slug {
            Some(slug) => {
                let slug = slugify(&slug);
                if slug.is_empty() {
                    return Err(empty_slug());
                }
                Some(slug)
            }
            None => None,
        };
        Ok(NewsPatch {
            slug,
            title: self.title.map(|s| sanitize(&s)),
            excerpt: self.excerpt.map(|s| sanitize(&s)),
            content: self.content.map(|s| sanitize(&s)),
            published: self.published,
            author_id: self.author_id,
        })
    }
}

fn empty_slug() -> ApiError {
    ApiError::InvalidRequest("slug must contain at least one alphanumeric character".to_string())
}

mod crud_api {
    use axum::{Json, response::IntoResponse};
    use garde::Validate as _;
    use http::StatusCode;
    use newsroom_dal::news::NewsRepository;

    use super::{CreateNewsRequest, UpdateNewsRequest};
    use crate::{
        error::ApiResult,
        rest_api::{AppJson, AppPath, AppQuery, Page, Paging, paging::MAX_NEWS_OFFSET},
    };

    pub async fn list(
        repository: NewsRepository,
        AppQuery(paging): AppQuery<Paging>,
    ) -> ApiResult<impl IntoResponse> {
        let params = paging.into_listing_params(Some(MAX_NEWS_OFFSET))?;
        let limit = params.limit;
        let batch = repository.list(params).await?;
        Ok((StatusCode::OK, Json(Page::from_batch(batch, limit))))
    }

    pub async fn count(repository: NewsRepository) -> ApiResult<impl IntoResponse> {
        let count = repository.count().await?;
        Ok((StatusCode::OK, Json(count)))
    }

    pub async fn get(
        AppPath(slug): AppPath<String>,
        repository: NewsRepository,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.get_by_slug(&slug).await?;
        Ok((StatusCode::OK, Json(record)))
    }

    pub async fn create(
        repository: NewsRepository,
        AppJson(payload): AppJson<CreateNewsRequest>,
    ) -> ApiResult<impl IntoResponse> {
        let payload = payload.trimmed();
        payload.validate()?;
        let record = repository.create(payload.into_payload()?).await?;
        Ok((StatusCode::CREATED, Json(record)))
    }

    pub async fn update(
        AppPath(slug): AppPath<String>,
        repository: NewsRepository,
        AppJson(payload): AppJson<UpdateNewsRequest>,
    ) -> ApiResult<impl IntoResponse> {
        let payload = payload.trimmed();
        payload.validate()?;
        let record = repository.update(&slug, payload.into_patch()?).await?;
        Ok((StatusCode::OK, Json(record)))
    }

    pub async fn delete(
        AppPath(slug): AppPath<String>,
        repository: NewsRepository,
    ) -> ApiResult<impl IntoResponse> {
        repository.delete(&slug).await?;
        Ok((StatusCode::NO_CONTENT, ()))
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(crud_api::list).post(crud_api::create))
        .route("/count", get(crud_api::count))
        .route(
            "/{slug}",
            get(crud_api::get)
                .put(crud_api::update)
                .delete(crud_api::delete),
        )
}
