#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{ids, post, seeded_db, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use soft_enable::{EnableSelectExt, HookEvent};
use tracing_test::traced_test;

#[tokio::test]
async fn bulk_disable_on_filtered_query() {
    let db = seeded_db().await;

    let rows = db
        .find::<user::Entity>()
        .filter(user::Column::Name.is_in(["A", "C"]))
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 2);

    assert_eq!(db.find::<user::Entity>().count(db.conn()).await.unwrap(), 0);
    assert_eq!(
        db.find::<user::Entity>()
            .with_disabled()
            .count(db.conn())
            .await
            .unwrap(),
        4
    );
}

#[tokio::test]
async fn bulk_enable_reaches_disabled_and_null_rows() {
    let db = seeded_db().await;

    let rows = db.find::<user::Entity>().enable(db.conn()).await.unwrap();
    assert_eq!(rows, 4);
    assert_eq!(db.find::<user::Entity>().count(db.conn()).await.unwrap(), 4);
}

#[tokio::test]
async fn bulk_update_keeps_explicit_stage() {
    let db = seeded_db().await;

    // only B is `false`; D stays NULL
    let rows = db
        .find::<user::Entity>()
        .only_disabled()
        .enable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let enabled = db
        .find::<user::Entity>()
        .order_by_asc(user::Column::Id)
        .all(db.conn())
        .await
        .unwrap();
    assert_eq!(ids(&enabled, |u| u.id), vec![1, 2, 3]);
}

#[tokio::test]
async fn bulk_disable_by_primary_key_touches_one_row() {
    let db = seeded_db().await;

    let rows = db
        .find_by_id::<user::Entity, _>(1)
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let enabled = db.find::<user::Entity>().all(db.conn()).await.unwrap();
    assert_eq!(ids(&enabled, |u| u.id), vec![3]);
}

#[tokio::test]
async fn bulk_disable_keeps_filters_of_wrapped_select() {
    let db = seeded_db().await;

    let rows = user::Entity::find()
        .filter(user::Column::Id.eq(1))
        .enablement()
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let enabled = db.find::<user::Entity>().all(db.conn()).await.unwrap();
    assert_eq!(ids(&enabled, |u| u.id), vec![3]);

    // the wrapped filter still narrows once the default stage is gone
    let rows = user::Entity::find()
        .filter(user::Column::Id.is_in([2, 4]))
        .enablement()
        .enable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let enabled = db.find::<user::Entity>().all(db.conn()).await.unwrap();
    assert_eq!(ids(&enabled, |u| u.id), vec![2, 3, 4]);
}

#[tokio::test]
async fn bulk_disable_on_relation_query() {
    let db = seeded_db().await;
    let a = db
        .find_by_id::<user::Entity, _>(1)
        .one(db.conn())
        .await
        .unwrap()
        .expect("A is enabled");

    let rows = db
        .find_related::<_, post::Entity>(&a)
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let remaining = db.find::<post::Entity>().all(db.conn()).await.unwrap();
    assert_eq!(ids(&remaining, |p| p.id), vec![4]);
}

#[tokio::test]
async fn bulk_disable_on_joined_query() {
    let db = seeded_db().await;

    let rows = db
        .find::<post::Entity>()
        .join_related::<user::Entity>()
        .filter(user::Column::Name.eq("B"))
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let remaining = db.find::<post::Entity>().all(db.conn()).await.unwrap();
    assert_eq!(ids(&remaining, |p| p.id), vec![1]);
}

#[tokio::test]
async fn bulk_disable_with_subquery_filter() {
    let db = seeded_db().await;

    // C's only post is disabled and D has none
    let rows = db
        .find::<user::Entity>()
        .doesnt_have::<post::Entity>()
        .unwrap()
        .disable(db.conn())
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let enabled = db
        .find::<user::Entity>()
        .all(db.conn())
        .await
        .unwrap();
    assert_eq!(ids(&enabled, |u| u.id), vec![1]);
}

#[tokio::test]
async fn bulk_update_skips_record_hooks() {
    let db = seeded_db().await;
    db.hooks()
        .disabling::<user::Entity, _, _>(|_| false);
    assert_eq!(db.hooks().len::<user::Entity>(HookEvent::Disabling), 1);

    let rows = db.find::<user::Entity>().disable(db.conn()).await.unwrap();
    assert_eq!(rows, 4);
}

#[tokio::test]
#[traced_test]
async fn bulk_update_is_logged() {
    let db = seeded_db().await;

    db.find::<user::Entity>()
        .filter(user::Column::Id.eq(2))
        .enable(db.conn())
        .await
        .unwrap();

    assert!(logs_contain("bulk soft-enable update"));
    assert!(logs_contain("rows=1"));
}
