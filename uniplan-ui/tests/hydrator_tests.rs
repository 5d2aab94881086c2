//! Integration tests for the detail hydrator
//!
//! Runs the client against a local fixture server to exercise the real
//! HTTP path: concurrent detail/round fetches, the object-or-array payload
//! convention, and the caller-meta-wins merge.

mod helpers;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uniplan_ui::services::DetailClient;
use uniplan_ui::types::CatalogMeta;

fn meta() -> CatalogMeta {
    CatalogMeta {
        university_id: "001".to_string(),
        university_name_th: "จุฬาลงกรณ์มหาวิทยาลัย".to_string(),
    }
}

#[tokio::test]
async fn test_hydrate_merges_meta_over_remote_identity_fields() {
    let router = Router::new()
        .route(
            "/ly-programs/p1.json",
            get(|| async {
                Json(json!({
                    "program_id": "p1",
                    "program_name_th": "เคมี",
                    "university_id": "999",
                    "university_name_th": "มหาวิทยาลัยอื่น",
                    "min_score": 40.0,
                    "max_score": 85.5,
                    "scores": {"tgat": 30, "a_lv_65": "20"}
                }))
            }),
        )
        .route(
            "/rounds/p1.json",
            get(|| async { Json(json!({"round_3": {"quota": 50}})) }),
        );
    let base = helpers::serve(router).await;

    let client = DetailClient::new(base.as_str()).unwrap();
    let detail = client.hydrate("p1", &meta()).await.unwrap();

    // Caller metadata wins over the remote payload's identity fields
    assert_eq!(detail.university_id, "001");
    assert_eq!(detail.university_name_th, "จุฬาลงกรณ์มหาวิทยาลัย");

    assert_eq!(detail.program_id, "p1");
    assert_eq!(detail.min_score, 40.0);
    assert_eq!(detail.round, Some(json!({"round_3": {"quota": 50}})));
    assert!(detail.scores.is_some());
}

#[tokio::test]
async fn test_hydrate_unwraps_one_element_arrays() {
    let router = Router::new()
        .route(
            "/ly-programs/p2.json",
            get(|| async {
                Json(json!([{
                    "program_id": "p2",
                    "min_score": 10.0,
                    "max_score": 20.0
                }]))
            }),
        )
        .route(
            "/rounds/p2.json",
            get(|| async { Json(json!([{"round_1": {}}])) }),
        );
    let base = helpers::serve(router).await;

    let client = DetailClient::new(base.as_str()).unwrap();
    let detail = client.hydrate("p2", &meta()).await.unwrap();

    assert_eq!(detail.program_id, "p2");
    assert_eq!(detail.round, Some(json!({"round_1": {}})));
}

#[tokio::test]
async fn test_hydrate_fails_when_round_fetch_fails() {
    // Only the detail route exists; the round fetch 404s
    let router = Router::new().route(
        "/ly-programs/p3.json",
        get(|| async { Json(json!({"program_id": "p3"})) }),
    );
    let base = helpers::serve(router).await;

    let client = DetailClient::new(base.as_str()).unwrap();
    let result = client.hydrate("p3", &meta()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_hydrate_fails_when_detail_fetch_fails() {
    let router = Router::new()
        .route(
            "/ly-programs/p4.json",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/rounds/p4.json", get(|| async { Json(json!({})) }));
    let base = helpers::serve(router).await;

    let client = DetailClient::new(base.as_str()).unwrap();
    let result = client.hydrate("p4", &meta()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_hydrate_fails_on_non_json_payload() {
    let router = Router::new()
        .route("/ly-programs/p5.json", get(|| async { "definitely not json" }))
        .route("/rounds/p5.json", get(|| async { Json(json!({})) }));
    let base = helpers::serve(router).await;

    let client = DetailClient::new(base.as_str()).unwrap();
    let result = client.hydrate("p5", &meta()).await;

    assert!(result.is_err());
}
