use sea_orm::{ColumnTrait, Condition};
use std::collections::HashMap;

use crate::errors::ApiError;

/// How a filterable column matches its query-parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Column equals the value
    Exact,
    /// Column starts with the value
    Prefix,
    /// Column contains the value
    Contains,
}

/// Query-parameter names consumed by the paging layer; never treated as
/// filters.
pub const RESERVED_PARAMS: &[&str] = &["limit", "offset", "orderBy", "fields"];

/// Build the AND-combined filter condition from the request's query
/// parameters.
///
/// Every non-reserved parameter must name a filterable column; its
/// declared [`MatchMode`] decides the predicate. The resource's
/// visibility filter, when present, is appended so soft-deleted rows
/// never appear in default reads.
///
/// # Errors
///
/// Returns [`ApiError::UnknownField`] for a parameter that is neither
/// reserved nor filterable. Rejecting instead of ignoring keeps a
/// mistyped filter from returning an unfiltered list that looks filtered.
pub fn build_condition<C>(
    raw_params: &HashMap<String, String>,
    filterable_columns: &[(&str, C, MatchMode)],
    visibility: Option<Condition>,
) -> Result<Condition, ApiError>
where
    C: ColumnTrait + Copy,
{
    let mut condition = Condition::all();

    for (key, value) in raw_params {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            continue;
        }

        let (_, column, mode) = filterable_columns
            .iter()
            .find(|&&(col_name, _, _)| col_name == key)
            .ok_or_else(|| ApiError::unknown_field(key.clone(), "filter"))?;

        condition = condition.add(match mode {
            MatchMode::Exact => column.eq(value.clone()),
            MatchMode::Prefix => column.starts_with(value.clone()),
            MatchMode::Contains => column.contains(value.clone()),
        });
    }

    if let Some(visibility) = visibility {
        condition = condition.add(visibility);
    }

    Ok(condition)
}
