use newsroom_dal::{Batch, DEFAULT_LIMIT, ListingParams, MAX_LIMIT};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Largest offset the news listing accepts.
pub const MAX_NEWS_OFFSET: i64 = 100_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Paging {
    /// Pure parse-or-fail resolution of the paging window; `max_offset`
    /// bounds the offset where the endpoint requires it.
    pub fn into_listing_params(self, max_offset: Option<i64>) -> ApiResult<ListingParams> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::InvalidRequest(
                "offset must not be negative".to_string(),
            ));
        }
        if let Some(max) = max_offset {
            if offset > max {
                return Err(ApiError::InvalidRequest(format!(
                    "offset must not exceed {max}"
                )));
            }
        }
        Ok(ListingParams::new(offset, limit))
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub paging: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

impl<T> Page<T>
where
    T: Serialize,
{
    pub fn from_batch(batch: Batch<T>, limit: i64) -> Self {
        Page {
            data: batch.rows,
            paging: PageInfo {
                limit,
                offset: batch.offset,
                total: batch.total,
            },
        }
    }
}
