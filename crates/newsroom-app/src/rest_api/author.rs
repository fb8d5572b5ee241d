use newsroom_dal::author::AuthorRepository;

use crate::state::AppState;
#[allow(unused_imports)]
use axum::routing::{delete, get, post, put};

crate::repository_from_request!(AuthorRepository);

mod crud_api {
    use axum::{Json, response::IntoResponse};
    use garde::Validate as _;
    use http::StatusCode;
    use newsroom_dal::author::{AuthorRepository, CreateAuthor};

    use crate::{
        error::ApiResult,
        rest_api::{AppJson, AppPath, AppQuery, Page, Paging},
    };

    pub async fn list(
        repository: AuthorRepository,
        AppQuery(paging): AppQuery<Paging>,
    ) -> ApiResult<impl IntoResponse> {
        let params = paging.into_listing_params(None)?;
        let limit = params.limit;
        let batch = repository.list(params).await?;
        Ok((StatusCode::OK, Json(Page::from_batch(batch, limit))))
    }

    pub async fn count(repository: AuthorRepository) -> ApiResult<impl IntoResponse> {
        let count = repository.count().await?;
        Ok((StatusCode::OK, Json(count)))
    }

    pub async fn get(
        AppPath(id): AppPath<i64>,
        repository: AuthorRepository,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.get(id).await?;
        Ok((StatusCode::OK, Json(record)))
    }

    pub async fn create(
        repository: AuthorRepository,
        AppJson(payload): AppJson<CreateAuthor>,
    ) -> ApiResult<impl IntoResponse> {
        payload.validate()?;
        let record = repository.create(payload).await?;
        Ok((StatusCode::CREATED, Json(record)))
    }

    pub async fn update(
        AppPath(id): AppPath<i64>,
        repository: AuthorRepository,
        AppJson(payload): AppJson<CreateAuthor>,
    ) -> ApiResult<impl IntoResponse> {
        payload.validate()?;
        let record = repository.update(id, payload).await?;
        Ok((StatusCode::OK, Json(record)))
    }

    pub async fn delete(
        AppPath(id): AppPath<i64>,
        repository: AuthorRepository,
    ) -> ApiResult<impl IntoResponse> {
        repository.delete(id).await?;
        Ok((StatusCode::NO_CONTENT, ()))
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(crud_api::list).post(crud_api::create))
        .route("/count", get(crud_api::count))
        .route(
            "/{id}",
            get(crud_api::get)
                .put(crud_api::update)
                .delete(crud_api::delete),
        )
}
