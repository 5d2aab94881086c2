//! End-to-end choice flow tests against SQLite
//!
//! Exercises the controller with the real SQLite store (in-memory pool)
//! plus a fixture server for the hydration path of `load()`.

mod helpers;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use uniplan_common::db::{self, ChoiceEntry};
use uniplan_ui::choices::{ChoiceController, SqliteChoiceStore};
use uniplan_ui::services::DetailClient;
use uniplan_ui::types::{CatalogEntry, ProgramDetail};

async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::create_schema(&pool).await.expect("schema");
    pool
}

fn detail(program_id: &str) -> ProgramDetail {
    ProgramDetail {
        program_id: program_id.to_string(),
        program_name_th: format!("คณะ {}", program_id),
        university_id: "001".to_string(),
        university_name_th: "จุฬาฯ".to_string(),
        min_score: 0.0,
        max_score: 0.0,
        scores: None,
        round: None,
        extra: Default::default(),
    }
}

fn catalog_entry(program_id: &str, university_name_th: &str) -> CatalogEntry {
    CatalogEntry {
        id: format!("cat-{}", program_id),
        university_id: "001".to_string(),
        university_name_th: university_name_th.to_string(),
        university_name_en: "Test University".to_string(),
        program_id: program_id.to_string(),
        program_name_th: format!("คณะ {}", program_id),
        program_name_en: format!("Program {}", program_id),
        cost: String::new(),
        graduate_rate: String::new(),
        employment_rate: String::new(),
        median_salary: String::new(),
        program_type_id: String::new(),
    }
}

#[tokio::test]
async fn test_save_then_read_back_in_rank_order() {
    let pool = memory_pool().await;
    let store = Arc::new(SqliteChoiceStore::new(pool.clone()));

    let mut controller = ChoiceController::new("u1", store);
    controller.add(detail("a"));
    controller.add(detail("b"));
    controller.add(detail("c"));
    controller.reorder(0, 2).unwrap();

    controller.save().await.unwrap();

    let rows = db::get_choices(&pool, "u1").await.unwrap();
    let ordered: Vec<(&str, i64)> = rows
        .iter()
        .map(|r| (r.program_id.as_str(), r.choice_order))
        .collect();
    assert_eq!(ordered, vec![("b", 0), ("c", 1), ("a", 2)]);
}

#[tokio::test]
async fn test_replace_supersedes_previous_set() {
    let pool = memory_pool().await;
    let store = Arc::new(SqliteChoiceStore::new(pool.clone()));

    let mut controller = ChoiceController::new("u1", store);
    controller.add(detail("a"));
    controller.add(detail("b"));
    controller.save().await.unwrap();

    controller.remove("a");
    controller.add(detail("c"));
    controller.save().await.unwrap();

    let rows = db::get_choices(&pool, "u1").await.unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.program_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let pool = memory_pool().await;

    let mut c1 = ChoiceController::new("u1", Arc::new(SqliteChoiceStore::new(pool.clone())));
    c1.add(detail("a"));
    c1.save().await.unwrap();

    let mut c2 = ChoiceController::new("u2", Arc::new(SqliteChoiceStore::new(pool.clone())));
    c2.add(detail("x"));
    c2.add(detail("y"));
    c2.save().await.unwrap();

    assert_eq!(db::get_choices(&pool, "u1").await.unwrap().len(), 1);
    assert_eq!(db::get_choices(&pool, "u2").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_choices_orders_by_rank_regardless_of_insert_order() {
    let pool = memory_pool().await;

    // Rows handed to the store out of rank order
    let rows = vec![
        ChoiceEntry {
            id: "r2".to_string(),
            user_id: "u1".to_string(),
            program_id: "second".to_string(),
            choice_order: 1,
        },
        ChoiceEntry {
            id: "r0".to_string(),
            user_id: "u1".to_string(),
            program_id: "first".to_string(),
            choice_order: 0,
        },
        ChoiceEntry {
            id: "r3".to_string(),
            user_id: "u1".to_string(),
            program_id: "third".to_string(),
            choice_order: 2,
        },
    ];
    db::replace_choices(&pool, "u1", &rows).await.unwrap();

    let read = db::get_choices(&pool, "u1").await.unwrap();
    let ids: Vec<&str> = read.iter().map(|r| r.program_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_load_hydrates_persisted_set_and_skips_unknown_programs() {
    let pool = memory_pool().await;
    let store = Arc::new(SqliteChoiceStore::new(pool.clone()));

    // Persisted set: p1 ranked after p2, plus a program no longer in the
    // catalog which must be skipped
    let rows = vec![
        ChoiceEntry {
            id: "r0".to_string(),
            user_id: "u1".to_string(),
            program_id: "p2".to_string(),
            choice_order: 0,
        },
        ChoiceEntry {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            program_id: "gone".to_string(),
            choice_order: 1,
        },
        ChoiceEntry {
            id: "r2".to_string(),
            user_id: "u1".to_string(),
            program_id: "p1".to_string(),
            choice_order: 2,
        },
    ];
    db::replace_choices(&pool, "u1", &rows).await.unwrap();

    // Remote payloads carry a bogus university name; the catalog must win
    let router = Router::new()
        .route(
            "/ly-programs/p1.json",
            get(|| async { Json(json!({"program_id": "p1", "university_name_th": "ผิด"})) }),
        )
        .route("/rounds/p1.json", get(|| async { Json(json!({})) }))
        .route(
            "/ly-programs/p2.json",
            get(|| async { Json(json!({"program_id": "p2", "university_name_th": "ผิด"})) }),
        )
        .route("/rounds/p2.json", get(|| async { Json(json!({})) }));
    let base = helpers::serve(router).await;
    let details = DetailClient::new(base.as_str()).unwrap();

    let catalog = vec![
        catalog_entry("p1", "มหาวิทยาลัยเชียงใหม่"),
        catalog_entry("p2", "มหาวิทยาลัยขอนแก่น"),
    ];

    let mut controller = ChoiceController::new("u1", store);
    controller.load(&catalog, &details).await.unwrap();

    let ids: Vec<&str> = controller
        .entries()
        .iter()
        .map(|e| e.program_id.as_str())
        .collect();
    assert_eq!(ids, vec!["p2", "p1"]);

    // Catalog identity fields won over the remote payloads
    assert_eq!(controller.entries()[0].university_name_th, "มหาวิทยาลัยขอนแก่น");
    assert_eq!(controller.entries()[1].university_name_th, "มหาวิทยาลัยเชียงใหม่");
}

#[tokio::test]
async fn test_load_failure_leaves_previous_sequence_intact() {
    let pool = memory_pool().await;
    let store = Arc::new(SqliteChoiceStore::new(pool.clone()));

    let rows = vec![ChoiceEntry {
        id: "r0".to_string(),
        user_id: "u1".to_string(),
        program_id: "p1".to_string(),
        choice_order: 0,
    }];
    db::replace_choices(&pool, "u1", &rows).await.unwrap();

    // Fixture serves no routes at all, so hydration fails
    let base = helpers::serve(Router::new()).await;
    let details = DetailClient::new(base.as_str()).unwrap();
    let catalog = vec![catalog_entry("p1", "จุฬาฯ")];

    let mut controller = ChoiceController::new("u1", store);
    controller.add(detail("local"));

    assert!(controller.load(&catalog, &details).await.is_err());
    assert_eq!(controller.entries().len(), 1);
    assert_eq!(controller.entries()[0].program_id, "local");
}
