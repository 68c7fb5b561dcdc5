use sea_orm::{
    entity::prelude::*, sea_query::Expr, ActiveValue::NotSet, Condition, ConnectionTrait, PaginatorTrait,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_number: i32,
    #[sea_orm(column_type = "Text")]
    pub first_name: String,
    #[sea_orm(column_type = "Text")]
    pub last_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rows that have not been soft-deleted. Every read, probe and write below
/// is built on this condition.
pub fn active() -> Condition {
    Condition::all().add(Column::DeletedAt.is_null())
}

pub fn find_active() -> Select<Entity> {
    Entity::find().filter(active())
}

pub async fn find_all_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(find_active().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_active_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(find_active().filter(Column::Id.eq(id)).one(db).await?)
}

pub async fn find_active_by_customer_number<C: ConnectionTrait>(
    db: &C,
    customer_number: i32,
) -> Result<Option<Model>, ModelError> {
    Ok(find_active().filter(Column::CustomerNumber.eq(customer_number)).one(db).await?)
}

/// True when at least one live row matches `condition`.
pub async fn exists_active<C: ConnectionTrait>(db: &C, condition: Condition) -> Result<bool, ModelError> {
    let n = find_active().filter(condition).count(db).await?;
    Ok(n > 0)
}

/// Insert a row and return the id assigned by the database.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    customer_number: i32,
    first_name: &str,
    last_name: &str,
    created_at: DateTimeWithTimeZone,
) -> Result<i32, ModelError> {
    if first_name.is_empty() || last_name.is_empty() {
        return Err(ModelError::Validation("first_name and last_name are required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        customer_number: Set(customer_number),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        created_at: Set(created_at),
        updated_at: Set(None),
        deleted_at: Set(None),
    };
    let res = Entity::insert(am).exec(db).await?;
    Ok(res.last_insert_id)
}

/// Replace the mutable fields of a live row; returns rows affected.
pub async fn update_active<C: ConnectionTrait>(
    db: &C,
    id: i32,
    customer_number: i32,
    first_name: &str,
    last_name: &str,
    updated_at: DateTimeWithTimeZone,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::CustomerNumber, Expr::value(customer_number))
        .col_expr(Column::FirstName, Expr::value(first_name.to_string()))
        .col_expr(Column::LastName, Expr::value(last_name.to_string()))
        .col_expr(Column::UpdatedAt, Expr::value(updated_at))
        .filter(Column::Id.eq(id))
        .filter(active())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Stamp `deleted_at` on a live row; returns rows affected (0 when already gone).
pub async fn soft_delete<C: ConnectionTrait>(
    db: &C,
    id: i32,
    deleted_at: DateTimeWithTimeZone,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::DeletedAt, Expr::value(deleted_at))
        .filter(Column::Id.eq(id))
        .filter(active())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
