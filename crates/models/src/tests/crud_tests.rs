use anyhow::Result;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait};

use crate::customer;

use super::setup_test_db;

fn ts(secs: i64) -> DateTime<FixedOffset> {
    Utc.timestamp_opt(secs, 0).unwrap().into()
}

/// Insert assigns increasing ids and rows come back in insertion order
#[tokio::test]
async fn test_insert_and_list_in_order() -> Result<()> {
    let db = setup_test_db().await?;

    let first = customer::insert(&db, 10, "Danilo", "Sano", ts(1_600_000_000)).await?;
    let second = customer::insert(&db, 11, "Ada", "Lovelace", ts(1_600_000_100)).await?;
    assert!(first > 0);
    assert!(second > first);

    let all = customer::find_all_active(&db).await?;
    let numbers: Vec<i32> = all.iter().map(|c| c.customer_number).collect();
    assert_eq!(numbers, vec![10, 11]);
    assert_eq!(all[0].created_at, ts(1_600_000_000));
    assert!(all[0].updated_at.is_none());
    assert!(all[0].deleted_at.is_none());
    Ok(())
}

#[tokio::test]
async fn test_insert_rejects_empty_names() -> Result<()> {
    let db = setup_test_db().await?;
    let err = customer::insert(&db, 1, "", "Sano", ts(0)).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Validation(_)));
    Ok(())
}

/// Update replaces the mutable fields and stamps updated_at
#[tokio::test]
async fn test_update_active_row() -> Result<()> {
    let db = setup_test_db().await?;
    let id = customer::insert(&db, 999, "Danilo", "Sano", ts(1_609_459_200)).await?;

    let affected = customer::update_active(&db, id, 1000, "Dan", "S", ts(1_609_459_260)).await?;
    assert_eq!(affected, 1);

    let found = customer::find_active_by_id(&db, id).await?.expect("row");
    assert_eq!(found.id, id);
    assert_eq!(found.customer_number, 1000);
    assert_eq!(found.first_name, "Dan");
    assert_eq!(found.last_name, "S");
    assert_eq!(found.created_at, ts(1_609_459_200));
    assert_eq!(found.updated_at, Some(ts(1_609_459_260)));
    Ok(())
}

/// Soft delete hides the row from every active lookup but keeps it stored
#[tokio::test]
async fn test_soft_delete_hides_row() -> Result<()> {
    let db = setup_test_db().await?;
    let id = customer::insert(&db, 42, "Grace", "Hopper", ts(1_700_000_000)).await?;

    assert_eq!(customer::soft_delete(&db, id, ts(1_700_000_500)).await?, 1);

    assert!(customer::find_active_by_id(&db, id).await?.is_none());
    assert!(customer::find_active_by_customer_number(&db, 42).await?.is_none());
    assert!(!customer::exists_active(&db, customer::active().add(customer::Column::Id.eq(id))).await?);
    assert!(customer::find_all_active(&db).await?.is_empty());

    // still physically present
    let raw = customer::Entity::find_by_id(id).one(&db).await?.expect("row kept");
    assert_eq!(raw.deleted_at, Some(ts(1_700_000_500)));

    // a second delete and an update both report no affected rows
    assert_eq!(customer::soft_delete(&db, id, ts(1_700_000_600)).await?, 0);
    assert_eq!(customer::update_active(&db, id, 43, "G", "H", ts(1_700_000_700)).await?, 0);
    Ok(())
}

/// A deleted row's customer number can be reused by a new row
#[tokio::test]
async fn test_customer_number_reusable_after_delete() -> Result<()> {
    let db = setup_test_db().await?;
    let old = customer::insert(&db, 7, "Old", "Row", ts(1)).await?;
    customer::soft_delete(&db, old, ts(2)).await?;
    let new = customer::insert(&db, 7, "New", "Row", ts(3)).await?;

    let found = customer::find_active_by_customer_number(&db, 7).await?.expect("live row");
    assert_eq!(found.id, new);
    assert_ne!(old, new);
    Ok(())
}

/// Long names are stored as given
#[tokio::test]
async fn test_long_names_round_trip() -> Result<()> {
    let db = setup_test_db().await?;
    let first = "D".repeat(300);
    let last = "S".repeat(1_000);
    let id = customer::insert(&db, 5, &first, &last, ts(10)).await?;

    let found = customer::find_active_by_id(&db, id).await?.expect("row");
    assert_eq!(found.first_name, first);
    assert_eq!(found.last_name, last);
    Ok(())
}
