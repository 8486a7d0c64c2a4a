use crate::errors::ApiError;
use crate::models::{ListParams, Page};
use crate::query;
use crate::traits::CrudResource;
use crate::validation::Validatable;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use hyper::HeaderMap;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;
use std::collections::HashMap;

/// Mount the CRUD handlers for a resource at `/{plural}`.
#[must_use]
pub fn router<T: CrudResource>() -> Router<DatabaseConnection> {
    let collection = format!("/{}", T::RESOURCE_NAME_PLURAL);
    let item = format!("/{}/{{id}}", T::RESOURCE_NAME_PLURAL);

    Router::new()
        .route(&collection, get(list_all::<T>).post(create_one::<T>))
        .route(
            &item,
            get(get_one::<T>).put(put_one::<T>).delete(delete_one::<T>),
        )
}

/// List one page of the collection.
///
/// Takes the typed paging parameters plus the raw parameter map; the
/// non-reserved parameters become filter predicates.
pub async fn list_all<T: CrudResource>(
    Query(params): Query<ListParams>,
    Query(raw_params): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Page<Value>>, ApiError> {
    let page = query::read_page::<T, _>(&db, &params, &raw_params).await?;
    Ok(Json(page))
}

/// Fetch a single visible record by id.
pub async fn get_one<T: CrudResource>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<T>, ApiError> {
    let item = T::get_one(&db, id).await?;
    Ok(Json(item))
}

/// Create a record; 201 with the stored record and its Location.
///
/// The insert runs in its own transaction at the resource's declared
/// isolation level; a commit failure rolls back and surfaces as a store
/// error.
pub async fn create_one<T: CrudResource>(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<T::Create>,
) -> Result<(StatusCode, HeaderMap, Json<T>), ApiError> {
    payload.validate()?;

    let created = db
        .transaction_with_config(
            |txn| Box::pin(async move { T::create(txn, payload).await }),
            T::mutation_isolation(),
            None,
        )
        .await?;

    tracing::debug!(
        resource = T::RESOURCE_NAME_SINGULAR,
        id = created.id(),
        "created record"
    );
    Ok((
        StatusCode::CREATED,
        location_header::<T>(created.id()),
        Json(created),
    ))
}

/// Replace the record at `id`, creating it there when absent.
///
/// 200 with the replaced record, or 201 + Location when the identifier
/// was free. Precondition read and write share one transaction.
pub async fn put_one<T: CrudResource>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<T::Update>,
) -> Result<(StatusCode, HeaderMap, Json<T>), ApiError> {
    payload.validate()?;

    let (saved, created) = db
        .transaction_with_config(
            |txn| Box::pin(async move { T::put(txn, id, payload).await }),
            T::mutation_isolation(),
            None,
        )
        .await?;

    if created {
        tracing::debug!(
            resource = T::RESOURCE_NAME_SINGULAR,
            id = saved.id(),
            "created record via put"
        );
        Ok((
            StatusCode::CREATED,
            location_header::<T>(saved.id()),
            Json(saved),
        ))
    } else {
        Ok((StatusCode::OK, HeaderMap::new(), Json(saved)))
    }
}

/// Delete the visible record at `id`; 204 on success.
pub async fn delete_one<T: CrudResource>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    db.transaction_with_config(
        |txn| Box::pin(async move { T::delete(txn, id).await }),
        T::mutation_isolation(),
        None,
    )
    .await?;

    tracing::debug!(resource = T::RESOURCE_NAME_SINGULAR, id, "deleted record");
    Ok(StatusCode::NO_CONTENT)
}

fn location_header<T: CrudResource>(id: i32) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let location = format!("/{}/{id}", T::RESOURCE_NAME_PLURAL);
    if let Ok(value) = location.parse() {
        headers.insert(hyper::header::LOCATION, value);
    }
    headers
}
