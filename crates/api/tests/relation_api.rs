//! HTTP-level integration tests for the `/relations` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

use dossier_api::auth::password::hash_password;
use dossier_core::types::DbId;
use dossier_db::models::partner::CreatePartner;
use dossier_db::models::user::CreateUser;
use dossier_db::repositories::{PartnerRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_partner(pool: &PgPool, name: &str, is_company: bool, is_internal: bool) -> DbId {
    PartnerRepo::create(
        pool,
        &CreatePartner {
            name: name.to_string(),
            email: None,
            is_company,
            is_internal,
        },
    )
    .await
    .expect("partner creation should succeed")
    .id
}

async fn seed_logged_in_user(pool: &PgPool, app: axum::Router) -> String {
    let partner = seed_partner(pool, "Login Customer", false, false).await;
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: "relations".to_string(),
            email: "relations@test.com".to_string(),
            password_hash: hashed,
            partner_id: partner,
        },
    )
    .await
    .expect("user creation should succeed");

    let body = serde_json::json!({ "username": "relations", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn relations_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/relations").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_list_delete_relation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = seed_logged_in_user(&pool, app.clone()).await;

    let customer = seed_partner(&pool, "Acme Customer", false, false).await;
    let company = seed_partner(&pool, "Internal Co", true, true).await;

    // Create.
    let body = serde_json::json!({
        "customer_id": customer,
        "company_id": company,
        "code": "ACME-01",
    });
    let response = post_json_auth(app.clone(), "/api/v1/relations", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["customer_id"], customer);
    assert_eq!(created["data"]["code"], "ACME-01");
    let relation_id = created["data"]["id"].as_i64().unwrap();

    // List.
    let json = body_json(get_auth(app.clone(), "/api/v1/relations", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Delete.
    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/relations/{relation_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app, "/api/v1/relations", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

/// The company side must be a company-type partner flagged internal.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_relation_rejects_non_internal_company(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = seed_logged_in_user(&pool, app.clone()).await;

    let customer = seed_partner(&pool, "Acme Customer", false, false).await;
    let external_company = seed_partner(&pool, "External Co", true, false).await;
    let internal_person = seed_partner(&pool, "Internal Person", false, true).await;

    for company_id in [external_company, internal_person] {
        let body = serde_json::json!({
            "customer_id": customer,
            "company_id": company_id,
        });
        let response = post_json_auth(app.clone(), "/api/v1/relations", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_missing_relation_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = seed_logged_in_user(&pool, app.clone()).await;

    let response = delete_auth(app, "/api/v1/relations/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
