use async_trait::async_trait;
use pagequery::filter::MatchMode;
use pagequery::traits::{CrudResource, MergeIntoActiveModel};
use pagequery::validation::{Validatable, ValidationError, validators};
use sea_orm::{ActiveValue, Condition, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub visible: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// User as served by the API. The `visible` flag stays internal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UserCreate> for ActiveModel {
    fn from(create: UserCreate) -> Self {
        ActiveModel {
            id: ActiveValue::NotSet,
            first_name: ActiveValue::Set(create.first_name),
            last_name: ActiveValue::Set(create.last_name),
            email: ActiveValue::Set(create.email),
            visible: ActiveValue::Set(true),
        }
    }
}

impl MergeIntoActiveModel<ActiveModel> for UserUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> ActiveModel {
        existing.first_name = ActiveValue::Set(self.first_name);
        existing.last_name = ActiveValue::Set(self.last_name);
        existing.email = ActiveValue::Set(self.email);
        // A put reactivates soft-deleted rows
        existing.visible = ActiveValue::Set(true);
        existing
    }
}

impl Validatable for UserCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validators::validate_required("firstName", &self.first_name)?;
        validators::validate_required("lastName", &self.last_name)?;
        validators::validate_required("email", &self.email)?;
        validators::validate_email("email", &self.email)
    }
}

impl Validatable for UserUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        validators::validate_required("firstName", &self.first_name)?;
        validators::validate_required("lastName", &self.last_name)?;
        validators::validate_required("email", &self.email)?;
        validators::validate_email("email", &self.email)
    }
}

#[async_trait]
impl CrudResource for User {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type Create = UserCreate;
    type Update = UserUpdate;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "user";
    const RESOURCE_NAME_PLURAL: &'static str = "users";
    const DEFAULT_ORDER_BY: &'static str = "lastName,firstName";

    fn id(&self) -> i32 {
        self.id
    }

    fn sortable_columns() -> Vec<(&'static str, Column)> {
        vec![
            ("id", Column::Id),
            ("firstName", Column::FirstName),
            ("lastName", Column::LastName),
            ("email", Column::Email),
        ]
    }

    fn filterable_columns() -> Vec<(&'static str, Column, MatchMode)> {
        vec![
            ("firstName", Column::FirstName, MatchMode::Prefix),
            ("lastName", Column::LastName, MatchMode::Prefix),
            ("email", Column::Email, MatchMode::Exact),
        ]
    }

    fn projectable_fields() -> Vec<&'static str> {
        vec!["id", "firstName", "lastName", "email"]
    }

    fn visibility_filter() -> Option<Condition> {
        Some(Condition::all().add(Column::Visible.eq(true)))
    }

    fn new_at(id: i32, update: UserUpdate) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(id),
            first_name: ActiveValue::Set(update.first_name),
            last_name: ActiveValue::Set(update.last_name),
            email: ActiveValue::Set(update.email),
            visible: ActiveValue::Set(true),
        }
    }
}
