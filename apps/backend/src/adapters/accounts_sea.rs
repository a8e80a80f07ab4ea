//! SeaORM adapter for the account directory.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::infra::db_errors::{self, USER_NOT_FOUND_PREFIX};
use crate::repos::accounts::{Account, AccountDirectory, NewAccount};

impl From<users::Model> for Account {
    fn from(row: users::Model) -> Self {
        Self {
            id: row.id,
            sub: row.sub,
            name: row.name,
            phone: row.phone,
            is_active: row.is_active,
            is_admin: row.is_admin,
        }
    }
}

fn user_missing(id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{USER_NOT_FOUND_PREFIX}{id}"))
}

#[derive(Debug, Clone)]
pub struct AccountDirectorySea {
    db: DatabaseConnection,
}

impl AccountDirectorySea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountDirectory for AccountDirectorySea {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        let row = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_errors::map_db_err)?;
        Ok(row.map(Account::from))
    }

    async fn find_by_sub(&self, sub: &str) -> Result<Option<Account>, DomainError> {
        let row = users::Entity::find()
            .filter(users::Column::Sub.eq(sub))
            .one(&self.db)
            .await
            .map_err(db_errors::map_db_err)?;
        Ok(row.map(Account::from))
    }

    async fn create(&self, new: NewAccount) -> Result<Account, DomainError> {
        let now = OffsetDateTime::now_utc();
        let active = users::ActiveModel {
            id: NotSet,
            sub: Set(new.sub),
            name: Set(new.name),
            phone: Set(new.phone),
            is_active: Set(true),
            is_admin: Set(new.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = active
            .insert(&self.db)
            .await
            .map_err(db_errors::map_db_err)?;
        Ok(Account::from(row))
    }

    async fn deactivate(&self, id: i64) -> Result<Account, DomainError> {
        let now = OffsetDateTime::now_utc();
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsActive, Expr::val(false).into())
            .col_expr(users::Column::UpdatedAt, Expr::val(now).into())
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_errors::map_db_err)?;

        let row = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_errors::map_db_err)?;

        match row {
            None => Err(db_errors::map_db_err(user_missing(id))),
            Some(_) if result.rows_affected == 0 => Err(DomainError::conflict(
                ConflictKind::AlreadyInactive,
                format!("User {id} is already inactive"),
            )),
            Some(row) => Ok(Account::from(row)),
        }
    }
}
