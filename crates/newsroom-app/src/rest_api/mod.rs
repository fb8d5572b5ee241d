pub mod author;
pub mod news;
pub mod paging;

pub use paging::{Page, Paging};

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// [axum::Json] with malformed bodies rejected as 400 instead of axum's
/// default 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// [axum::extract::Query] with unparsable query strings rejected as 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// [axum::extract::Path] with undeserializable path parameters rejected
/// as 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
