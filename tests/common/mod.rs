use axum::Router;
use sea_orm::{ActiveValue, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::prelude::*;

pub mod user_entity;

use user_entity::User;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_user_app(db: DatabaseConnection) -> Router {
    Router::new()
        .merge(pagequery::routes::router::<User>())
        .with_state(db)
}

/// Insert rows directly, bypassing the API. Lets tests pick identifiers
/// and visibility, which the public surface never allows.
pub async fn seed_users(
    db: &DatabaseConnection,
    rows: &[(i32, &str, &str, &str, bool)],
) -> Result<(), DbErr> {
    for &(id, first_name, last_name, email, visible) in rows {
        let row = user_entity::ActiveModel {
            id: ActiveValue::Set(id),
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            visible: ActiveValue::Set(visible),
        };
        user_entity::Entity::insert(row).exec(db).await?;
    }
    Ok(())
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateUsersTable)]
    }
}

pub struct CreateUsersTable;

impl MigrationName for CreateUsersTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_users_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateUsersTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(UsersTable)
            .if_not_exists()
            .col(
                ColumnDef::new(UsersColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(UsersColumn::FirstName).string().not_null())
            .col(ColumnDef::new(UsersColumn::LastName).string().not_null())
            .col(ColumnDef::new(UsersColumn::Email).string().not_null())
            .col(
                ColumnDef::new(UsersColumn::Visible)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UsersTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum UsersColumn {
    Id,
    FirstName,
    LastName,
    Email,
    Visible,
}

impl Iden for UsersColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::FirstName => "first_name",
                Self::LastName => "last_name",
                Self::Email => "email",
                Self::Visible => "visible",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct UsersTable;

impl Iden for UsersTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "users").unwrap();
    }
}
