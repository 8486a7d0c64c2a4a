use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, IsolationLevel, Order, PaginatorTrait, PrimaryKeyTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::filter::MatchMode;
use crate::validation::Validatable;

/// Folds an update payload into an existing active model, replacing the
/// writable fields and leaving the identifier untouched.
pub trait MergeIntoActiveModel<ActiveModelType> {
    /// Merge this update payload into an existing active model
    fn merge_into_activemodel(self, existing: ActiveModelType) -> ActiveModelType;
}

/// A record type served through the paged-query and CRUD layers.
///
/// Implementors declare their Sea-ORM entity, which fields are sortable,
/// filterable and projectable, and how payloads map onto active models;
/// the default method implementations supply the store access. Every
/// method is generic over [`ConnectionTrait`], so the same operations run
/// on a plain connection or inside a transaction.
#[async_trait]
pub trait CrudResource: Sized + Send + Sync + Serialize + 'static
where
    Self::Entity: EntityTrait + Sync,
    Self::ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync,
    <Self::Entity as EntityTrait>::Model: Sync + IntoActiveModel<Self::ActiveModel>,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    Self: From<<Self::Entity as EntityTrait>::Model>,
{
    type Entity: EntityTrait + Sync;
    type Column: ColumnTrait + Copy + std::fmt::Debug;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>;
    type Create: Into<Self::ActiveModel> + Validatable + DeserializeOwned + Send;
    type Update: MergeIntoActiveModel<Self::ActiveModel> + Validatable + DeserializeOwned + Send;

    const ID_COLUMN: Self::Column;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    /// Ordering applied when a list request carries no `orderBy`, in the
    /// same comma-separated field-name syntax the parameter uses.
    const DEFAULT_ORDER_BY: &'static str;

    /// The record's unique identifier
    fn id(&self) -> i32;

    /// API field names accepted in `orderBy`, with their columns
    fn sortable_columns() -> Vec<(&'static str, Self::Column)>;

    /// API field names accepted as filter parameters, with their columns
    /// and match modes
    fn filterable_columns() -> Vec<(&'static str, Self::Column, MatchMode)>;

    /// API field names accepted in `fields`
    fn projectable_fields() -> Vec<&'static str>;

    /// Condition excluding soft-deleted rows from default reads.
    /// `None` means every row is always visible.
    #[must_use]
    fn visibility_filter() -> Option<Condition> {
        None
    }

    /// Isolation level for single-record mutations. Passed explicitly
    /// into the transaction rather than configured globally.
    #[must_use]
    fn mutation_isolation() -> Option<IsolationLevel> {
        Some(IsolationLevel::ReadCommitted)
    }

    /// Build an active model that inserts the update payload at a
    /// caller-chosen identifier (the PUT-on-missing-record path).
    fn new_at(id: i32, update: Self::Update) -> Self::ActiveModel;

    /// Fetch one page of the filtered, sorted collection.
    async fn find_page<C: ConnectionTrait>(
        db: &C,
        condition: Condition,
        ordering: &[(Self::Column, Order)],
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Self::Entity::find().filter(condition);
        for (column, direction) in ordering {
            query = query.order_by(*column, direction.clone());
        }
        let models = query.offset(offset).limit(limit).all(db).await?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    /// Count the filtered collection, ignoring any page window.
    async fn total_count<C: ConnectionTrait>(db: &C, condition: Condition) -> Result<u64, DbErr> {
        let query = Self::Entity::find().filter(condition);
        PaginatorTrait::count(query, db).await
    }

    /// Fetch a page and the total count together.
    ///
    /// The default issues the two logical queries sequentially: count
    /// first, then the page window, the latter skipped entirely when
    /// `limit == 0`. A store capable of batching the two round trips can
    /// override this method; overriding it *is* the batched-queries
    /// capability.
    async fn fetch_page_and_count<C: ConnectionTrait>(
        db: &C,
        condition: Condition,
        ordering: &[(Self::Column, Order)],
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Self>, u64), DbErr> {
        let total = Self::total_count(db, condition.clone()).await?;
        if limit == 0 {
            return Ok((Vec::new(), total));
        }
        let results = Self::find_page(db, condition, ordering, offset, limit).await?;
        Ok((results, total))
    }

    /// Look up a row by identifier.
    ///
    /// `include_hidden` bypasses the visibility filter; it is an explicit
    /// capability of administrative write paths, never ambient state.
    async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
        include_hidden: bool,
    ) -> Result<Option<<Self::Entity as EntityTrait>::Model>, DbErr> {
        let mut query = Self::Entity::find_by_id(id);
        if !include_hidden {
            if let Some(visibility) = Self::visibility_filter() {
                query = query.filter(visibility);
            }
        }
        query.one(db).await
    }

    /// Fetch a single visible record.
    async fn get_one<C: ConnectionTrait>(db: &C, id: i32) -> Result<Self, DbErr> {
        let model = Self::find_by_id(db, id, false).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("{} not found", Self::RESOURCE_NAME_SINGULAR))
        })?;
        Ok(Self::from(model))
    }

    /// Insert a new record; the store assigns the identifier.
    async fn create<C: ConnectionTrait>(db: &C, create: Self::Create) -> Result<Self, DbErr> {
        let active: Self::ActiveModel = create.into();
        let model = active.insert(db).await?;
        Ok(Self::from(model))
    }

    /// Replace the record at `id`, creating it there when absent.
    ///
    /// Idempotent PUT semantics: the precondition read sees hidden rows
    /// (this is the administrative write path, and a successful PUT makes
    /// the row visible again); a missing row is inserted at the requested
    /// identifier. Returns the saved record and whether it was created.
    async fn put<C: ConnectionTrait>(
        db: &C,
        id: i32,
        update: Self::Update,
    ) -> Result<(Self, bool), DbErr> {
        match Self::find_by_id(db, id, true).await? {
            Some(model) => {
                let merged = update.merge_into_activemodel(model.into_active_model());
                let updated = merged.update(db).await?;
                Ok((Self::from(updated), false))
            }
            None => {
                let model = Self::new_at(id, update).insert(db).await?;
                Ok((Self::from(model), true))
            }
        }
    }

    /// Remove the visible record at `id`.
    ///
    /// Rows hidden by the visibility filter are reported as not found,
    /// indistinguishable from truly absent ones.
    async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<i32, DbErr> {
        let model = Self::find_by_id(db, id, false).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("{} not found", Self::RESOURCE_NAME_SINGULAR))
        })?;
        model.into_active_model().delete(db).await?;
        Ok(id)
    }
}
