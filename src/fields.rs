use serde_json::Value;

use crate::errors::ApiError;

/// Resolve the `fields` list against the resource's projectable field
/// names.
///
/// Returns `None` when no projection was requested (all fields).
///
/// # Errors
///
/// Returns [`ApiError::UnknownField`] when an item does not name a field
/// on the resource, or [`ApiError::InvalidPageParameter`] when an item is
/// empty.
pub fn resolve_projection(
    fields: Option<&str>,
    projectable_fields: &[&str],
) -> Result<Option<Vec<String>>, ApiError> {
    let Some(fields) = fields else {
        return Ok(None);
    };

    let mut resolved = Vec::new();
    for item in fields.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(ApiError::invalid_page_parameter(
                "fields must be a comma-separated list of field names",
            ));
        }
        if !projectable_fields.contains(&item) {
            return Err(ApiError::unknown_field(item, "fields"));
        }
        resolved.push(item.to_string());
    }

    Ok(Some(resolved))
}

/// Reduce a serialized record to the named fields.
///
/// Non-object values pass through untouched; the projection only makes
/// sense for JSON objects, which is what serialized records are.
#[must_use]
pub fn project(value: Value, fields: &[String]) -> Value {
    match value {
        Value::Object(mut map) => {
            map.retain(|key, _| fields.iter().any(|field| field == key));
            Value::Object(map)
        }
        other => other,
    }
}
