//! Integration tests for the `/api/v1/tryon/history` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, GARMENT_ID, OTHER_USER_ID, USER_ID};
use serde_json::json;
use tryon_core::tryon::SubjectSourceKind;
use tryon_core::types::DbId;
use tryon_db::models::status::TryOnStatus;
use tryon_db::models::tryon_history::CreateTryOnHistory;
use tryon_db::store::{HistoryStore, MemoryStore};

const HISTORY: &str = "/api/v1/tryon/history";

async fn seed(store: &MemoryStore, user_id: DbId, status: TryOnStatus) -> DbId {
    let input = CreateTryOnHistory {
        user_id,
        garment_id: Some(GARMENT_ID),
        subject_image_url: "/images/models/male_1.png".into(),
        subject_source: SubjectSourceKind::Preset,
        preset_subject_id: Some("male_1".into()),
        garment_image_url: "https://cdn.example/garments/shirt.jpg".into(),
        result_image_url: (status == TryOnStatus::Completed)
            .then(|| "https://cdn.example/results/r.png".to_string()),
        category: "upper_body".into(),
        scene_id: None,
        is_mock: true,
        status,
        error_message: (status == TryOnStatus::Failed).then(|| "boom".to_string()),
    };
    store.create(&input).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Test: second page of five completed records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_page_of_five() {
    let t = common::build_test_app().await;
    for _ in 0..5 {
        seed(&t.store, USER_ID, TryOnStatus::Completed).await;
    }
    seed(&t.store, USER_ID, TryOnStatus::Failed).await;

    let response = get_auth(t.app(), &format!("{HISTORY}?page=2&limit=2"), &t.token(USER_ID)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 5);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["totalPages"], 3);
    // Newest first: ids 5,4 | 3,2 | 1
    assert_eq!(json["data"][0]["id"], 3);
    assert_eq!(json["data"][1]["id"], 2);
}

#[tokio::test]
async fn page_past_end_is_empty() {
    let t = common::build_test_app().await;
    for _ in 0..3 {
        seed(&t.store, USER_ID, TryOnStatus::Completed).await;
    }

    let response = get_auth(t.app(), &format!("{HISTORY}?page=7&limit=2"), &t.token(USER_ID)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total"], 3);
}

#[tokio::test]
async fn limit_is_clamped() {
    let t = common::build_test_app().await;

    let response = get_auth(t.app(), &format!("{HISTORY}?page=0&limit=5000"), &t.token(USER_ID)).await;

    let json = body_json(response).await;
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 100);
    assert_eq!(json["pagination"]["totalPages"], 0);
}

#[tokio::test]
async fn non_numeric_page_is_400() {
    let t = common::build_test_app().await;
    let response = get_auth(t.app(), &format!("{HISTORY}?page=two"), &t.token(USER_ID)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_is_scoped_to_caller() {
    let t = common::build_test_app().await;
    seed(&t.store, USER_ID, TryOnStatus::Completed).await;
    seed(&t.store, OTHER_USER_ID, TryOnStatus::Completed).await;

    let json = body_json(get_auth(t.app(), HISTORY, &t.token(OTHER_USER_ID)).await).await;

    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["userId"], OTHER_USER_ID);
}

#[tokio::test]
async fn generated_records_appear_in_history() {
    let t = common::build_test_app().await;
    let token = t.token(USER_ID);
    for _ in 0..2 {
        let response = post_json(
            t.app(),
            "/api/v1/tryon/generate",
            &token,
            json!({ "garmentId": GARMENT_ID, "presetSubjectId": "female_2" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get_auth(t.app(), HISTORY, &token).await).await;
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["data"][0]["presetSubjectId"], "female_2");
    assert_eq!(json["data"][0]["status"], "completed");
}

// ---------------------------------------------------------------------------
// Test: get one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_own_record() {
    let t = common::build_test_app().await;
    let id = seed(&t.store, USER_ID, TryOnStatus::Failed).await;

    let response = get_auth(t.app(), &format!("{HISTORY}/{id}"), &t.token(USER_ID)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["status"], "failed");
    assert_eq!(json["data"]["errorMessage"], "boom");
}

#[tokio::test]
async fn get_foreign_record_is_404() {
    let t = common::build_test_app().await;
    let id = seed(&t.store, USER_ID, TryOnStatus::Completed).await;

    let response = get_auth(t.app(), &format!("{HISTORY}/{id}"), &t.token(OTHER_USER_ID)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "history record not found");
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_own_record() {
    let t = common::build_test_app().await;
    let id = seed(&t.store, USER_ID, TryOnStatus::Completed).await;
    let token = t.token(USER_ID);

    let response = delete_auth(t.app(), &format!("{HISTORY}/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "history record deleted");

    let again = delete_auth(t.app(), &format!("{HISTORY}/{id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(t.store.history_len().await, 0);
}

#[tokio::test]
async fn delete_foreign_record_is_404_and_keeps_it() {
    let t = common::build_test_app().await;
    let id = seed(&t.store, USER_ID, TryOnStatus::Completed).await;

    let response = delete_auth(t.app(), &format!("{HISTORY}/{id}"), &t.token(OTHER_USER_ID)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(t.store.find_for_user(USER_ID, id).await.unwrap().is_some());
}

#[tokio::test]
async fn non_numeric_id_is_400_envelope() {
    let t = common::build_test_app().await;
    let token = t.token(USER_ID);

    for response in [
        get_auth(t.app(), &format!("{HISTORY}/abc"), &token).await,
        delete_auth(t.app(), &format!("{HISTORY}/abc"), &token).await,
    ] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["message"].as_str().unwrap().contains("abc"));
    }
}

#[tokio::test]
async fn history_requires_token() {
    let t = common::build_test_app().await;
    let response = get(t.app(), HISTORY).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
