//! HTTP-level integration tests for the auth endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json};
use sqlx::PgPool;

use dossier_api::auth::password::hash_password;
use dossier_core::types::DbId;
use dossier_db::models::partner::CreatePartner;
use dossier_db::models::user::CreateUser;
use dossier_db::repositories::{PartnerRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_partner(pool: &PgPool) -> DbId {
    PartnerRepo::create(
        pool,
        &CreatePartner {
            name: "Customer SARL".to_string(),
            email: None,
            is_company: false,
            is_internal: false,
        },
    )
    .await
    .expect("partner creation should succeed")
    .id
}

async fn seed_user(pool: &PgPool, username: &str, partner_id: DbId) -> (DbId, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
            partner_id,
        },
    )
    .await
    .expect("user creation should succeed");
    (user.id, password.to_string())
}

// ---------------------------------------------------------------------------
// Login flow
// ---------------------------------------------------------------------------

/// Successful login returns 200 with an access token and user info, and the
/// token is accepted by an authenticated endpoint.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_usable_token(pool: PgPool) {
    let partner = seed_partner(&pool).await;
    let (user_id, password) = seed_user(&pool, "loginuser", partner).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user_id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["partner_id"], partner);

    let token = json["access_token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/my/home", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password(pool: PgPool) {
    let partner = seed_partner(&pool).await;
    seed_user(&pool, "wrongpw", partner).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_inactive_user(pool: PgPool) {
    let partner = seed_partner(&pool).await;
    let (user_id, password) = seed_user(&pool, "inactive", partner).await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A garbage bearer token is rejected by authenticated endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/my/home", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
