use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ApiError;

/// Default page size when `limit` is absent
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest accepted `limit`
pub const MAX_LIMIT: u32 = 5_000;
/// Largest accepted `offset`
pub const MAX_OFFSET: u32 = 5_000;

/// Query parameters for paging, sorting and field selection.
///
/// # Paging
/// `limit` (default 10) and `offset` (default 0) are both capped at 5000.
/// `limit=0` returns an empty result set while still reporting the total
/// count of the filtered collection.
///
/// # Sorting
/// `orderBy` is a comma-separated list of field names, applied left to
/// right. A leading `-` sorts that field descending, for example:
///
/// ```text
/// orderBy=-lastName,firstName
/// ```
///
/// The record identifier is always appended as a final ascending key, so
/// pagination is stable even when the named fields contain duplicates.
///
/// # Field selection
/// `fields` is a comma-separated list of field names restricting the
/// output to a partial representation, for example `fields=id,firstName`.
/// Absent means all fields.
///
/// Names that do not resolve to fields on the resource fail the request
/// with a 400 before the store is queried.
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Maximum number of results for the current page (0..=5000).
    #[param(example = 10)]
    pub limit: Option<u32>,
    /// Zero-based offset from the beginning of the list (0..=5000).
    #[param(example = 0)]
    pub offset: Option<u32>,
    /// Comma-separated sort fields; `-` prefix for descending.
    ///
    /// Example: `-lastName,firstName`
    #[param(example = "lastName,firstName")]
    pub order_by: Option<String>,
    /// Comma-separated fields to include in the results.
    ///
    /// Example: `id,firstName`
    #[param(example = "id,firstName")]
    pub fields: Option<String>,
}

/// Validated page window, in the store's native width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl ListParams {
    /// Apply defaults and check bounds, without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPageParameter`] when `limit` or
    /// `offset` falls outside `[0, 5000]`.
    pub fn window(&self) -> Result<PageWindow, ApiError> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = self.offset.unwrap_or(0);

        if limit > MAX_LIMIT {
            return Err(ApiError::invalid_page_parameter(format!(
                "limit must be between 0 and {MAX_LIMIT}"
            )));
        }
        if offset > MAX_OFFSET {
            return Err(ApiError::invalid_page_parameter(format!(
                "offset must be between 0 and {MAX_OFFSET}"
            )));
        }

        Ok(PageWindow {
            limit: u64::from(limit),
            offset: u64::from(offset),
        })
    }
}

/// One page of a filtered, sorted collection.
///
/// `total_count` reflects the filter but not the page window; `limit`,
/// `offset` and `order_by` echo the request after defaulting.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub order_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults() {
        let params = ListParams::default();
        let window = params.window().unwrap();
        assert_eq!(window.limit, 10);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_window_explicit_values() {
        let params = ListParams {
            limit: Some(0),
            offset: Some(5_000),
            ..ListParams::default()
        };
        let window = params.window().unwrap();
        assert_eq!(window.limit, 0);
        assert_eq!(window.offset, 5_000);
    }

    #[test]
    fn test_window_rejects_limit_above_cap() {
        let params = ListParams {
            limit: Some(5_001),
            ..ListParams::default()
        };
        let err = params.window().unwrap_err();
        assert_eq!(err.code(), "invalid_page_parameter");
    }

    #[test]
    fn test_window_rejects_offset_above_cap() {
        let params = ListParams {
            offset: Some(5_001),
            ..ListParams::default()
        };
        let err = params.window().unwrap_err();
        assert_eq!(err.code(), "invalid_page_parameter");
    }
}
