use sea_orm::{ColumnTrait, sea_query::Order};

use crate::errors::ApiError;

/// Resolve a comma-separated `orderBy` list into concrete sort keys.
///
/// Each item is a field name, ascending by default; a leading `-` makes
/// that key descending. Keys apply left to right, and the identifier
/// column is always appended ascending so that repeated identical queries
/// page through the collection in the same order even when the named
/// fields contain duplicate values.
///
/// # Errors
///
/// Returns [`ApiError::UnknownField`] when an item does not name a
/// sortable field, or [`ApiError::InvalidPageParameter`] when an item is
/// empty (e.g. `orderBy=` or a trailing comma).
pub fn resolve_ordering<C>(
    order_by: &str,
    sortable_columns: &[(&str, C)],
    id_column: C,
) -> Result<Vec<(C, Order)>, ApiError>
where
    C: ColumnTrait + Copy,
{
    let mut keys = Vec::new();

    for item in order_by.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(ApiError::invalid_page_parameter(
                "orderBy must be a comma-separated list of field names",
            ));
        }

        let (name, direction) = match item.strip_prefix('-') {
            Some(rest) => (rest, Order::Desc),
            None => (item, Order::Asc),
        };

        let column = sortable_columns
            .iter()
            .find(|&&(col_name, _)| col_name == name)
            .map(|&(_, col)| col)
            .ok_or_else(|| ApiError::unknown_field(name, "orderBy"))?;

        keys.push((column, direction));
    }

    // Deterministic tiebreak; duplicates in the named keys cannot reorder
    // rows between identical requests.
    keys.push((id_column, Order::Asc));
    Ok(keys)
}
