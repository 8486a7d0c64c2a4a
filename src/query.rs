use sea_orm::ConnectionTrait;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::ApiError;
use crate::fields;
use crate::filter;
use crate::models::{ListParams, Page};
use crate::sort;
use crate::traits::CrudResource;

/// Run the paged read pipeline for a resource.
///
/// Order of operations:
/// 1. Validate everything that can fail without the store: page bounds,
///    `orderBy` resolution, `fields` resolution, filter parameters. A
///    request that fails here never reaches the store.
/// 2. Count the filtered collection (the page window does not affect the
///    total).
/// 3. Fetch the sorted page window, skipped entirely when `limit == 0`.
/// 4. Project results down to the requested fields, when given.
///
/// The store sees exactly two logical queries per call (one count, one
/// page window), issued through [`CrudResource::fetch_page_and_count`].
///
/// # Errors
///
/// Returns the validation errors described above, or a store error
/// translated through [`ApiError::from`].
pub async fn read_page<T, C>(
    db: &C,
    params: &ListParams,
    raw_params: &HashMap<String, String>,
) -> Result<Page<Value>, ApiError>
where
    T: CrudResource,
    C: ConnectionTrait,
{
    let window = params.window()?;
    let order_by = params
        .order_by
        .clone()
        .unwrap_or_else(|| T::DEFAULT_ORDER_BY.to_string());
    let ordering = sort::resolve_ordering(&order_by, &T::sortable_columns(), T::ID_COLUMN)?;
    let projection = fields::resolve_projection(params.fields.as_deref(), &T::projectable_fields())?;
    let condition = filter::build_condition(
        raw_params,
        &T::filterable_columns(),
        T::visibility_filter(),
    )?;

    tracing::debug!(
        resource = T::RESOURCE_NAME_PLURAL,
        limit = window.limit,
        offset = window.offset,
        order_by = %order_by,
        "reading page"
    );

    let (rows, total_count) =
        T::fetch_page_and_count(db, condition, &ordering, window.offset, window.limit).await?;

    let mut results = Vec::with_capacity(rows.len());
    for row in &rows {
        let value = serde_json::to_value(row)
            .map_err(|e| ApiError::internal("Failed to serialize record", Some(e.to_string())))?;
        results.push(match &projection {
            Some(fields) => fields::project(value, fields),
            None => value,
        });
    }

    Ok(Page {
        results,
        total_count,
        limit: window.limit,
        offset: window.offset,
        order_by,
    })
}
