// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AdminDataResponse, AiRequest, AiResponse, ChatMessage, CheckoutResponse, Comment, Content,
        CreateCommentRequest, LoginRequest, LoginResponse, PublicUser, RegisterRequest,
        SuccessResponse, UploadResponse,
    },
    state::AppState,
};

pub mod admin;
pub mod ai;
pub mod auth;
pub mod comments;
pub mod contents;
pub mod health;
pub mod payments;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/contents", get(contents::list_contents))
        .route("/comments", post(comments::create_comment))
        .route("/admin/upload", post(admin::upload_media))
        .route("/admin/data", get(admin::admin_data))
        .route("/create-checkout-session", post(payments::create_checkout_session))
        .route("/ai", post(ai::complete));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::ready))
        .route("/health/live", get(health::live))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        contents::list_contents,
        comments::create_comment,
        admin::upload_media,
        admin::admin_data,
        payments::create_checkout_session,
        ai::complete,
        health::ready,
        health::live
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            PublicUser,
            Content,
            Comment,
            CreateCommentRequest,
            SuccessResponse,
            UploadResponse,
            AdminDataResponse,
            CheckoutResponse,
            ChatMessage,
            AiRequest,
            AiResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Contents", description = "Published content items"),
        (name = "Comments", description = "Comments on content"),
        (name = "Admin", description = "Admin-only uploads and data"),
        (name = "Payments", description = "Premium checkout"),
        (name = "Ai", description = "AI completion proxy"),
        (name = "Health", description = "Probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(configure: impl FnOnce(&mut AppConfig)) -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.data_dir = temp_dir.path().to_path_buf();
        config.jwt_secret = "api-test-secret".to_string();
        configure(&mut config);
        let state = AppState::new(&config).expect("Failed to build state");
        (state, temp_dir)
    }

    async fn seed_admin(state: &AppState) {
        state
            .authenticator
            .ensure_admin("adminpass")
            .await
            .expect("Failed to seed admin");
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed_json_request(uri: &str, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn multipart_upload(token: &str, premium: bool) -> Request<Body> {
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nFirst video\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nIntro\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"type\"\r\n\r\nvideo\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"premium\"\r\n\r\n{premium}\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"clip.mp4\"\r\n\
             Content-Type: video/mp4\r\n\r\nfake video bytes\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/admin/upload")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> (String, Value) {
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/login",
                json!({"email": email, "password": password}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        (body["token"].as_str().unwrap().to_string(), body)
    }

    #[tokio::test]
    async fn full_publishing_flow() {
        let (state, _dir) = test_state(|_| {});
        seed_admin(&state).await;
        let app = router(state);

        // Register and log in a regular user.
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/register",
                json!({"username": "alice", "email": "alice@x.com", "password": "pw1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let (user_token, login_body) = login(&app, "alice@x.com", "pw1").await;
        assert_eq!(login_body["user"]["username"], "alice");
        assert_eq!(login_body["user"]["role"], "user");

        // Admin uploads a premium content item.
        let (admin_token, _) = login(&app, "admin@local", "adminpass").await;
        let response = app
            .clone()
            .oneshot(multipart_upload(&admin_token, true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let upload = response_json(response).await;
        assert!(upload["url"].as_str().unwrap().starts_with("/uploads/"));

        // The user sees the item in the listing.
        let response = app
            .clone()
            .oneshot(get_request("/api/contents", Some(&user_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let contents = response_json(response).await;
        let content_id = contents[0]["id"].as_str().unwrap().to_string();
        assert_eq!(contents[0]["premium"], true);

        // The user comments on it.
        let response = app
            .clone()
            .oneshot(authed_json_request(
                "/api/comments",
                &user_token,
                json!({"contentId": content_id, "text": "great clip"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The admin data dump shows both, with attribution.
        let response = app
            .clone()
            .oneshot(get_request("/api/admin/data", Some(&admin_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let data = response_json(response).await;
        assert_eq!(data["contents"].as_array().unwrap().len(), 1);
        assert_eq!(data["comments"].as_array().unwrap().len(), 1);
        assert_eq!(data["comments"][0]["text"], "great clip");
        assert!(data["comments"][0]["userId"].is_string());
    }

    #[tokio::test]
    async fn login_response_never_exposes_password_hash() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        app.clone()
            .oneshot(json_request(
                "/api/register",
                json!({"username": "eve", "email": "eve@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/login",
                json!({"email": "eve@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let raw = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!raw.contains("password"));
        assert!(!raw.contains("argon2"));

        // Login then works, proving the stored record kept the hash.
        let (_, body) = login(&app, "eve@x.com", "pw").await;
        assert_eq!(body["user"]["username"], "eve");
    }

    #[tokio::test]
    async fn non_admin_upload_is_forbidden() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        app.clone()
            .oneshot(json_request(
                "/api/register",
                json!({"username": "bob", "email": "bob@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        let (token, _) = login(&app, "bob@x.com", "pw").await;

        let response = app
            .clone()
            .oneshot(multipart_upload(&token, false))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_surface_rejects_anonymous_with_401() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        let response = app
            .clone()
            .oneshot(get_request("/api/admin/data", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn contents_policy_toggle_controls_anonymous_access() {
        // Locked deployment: anonymous listing is rejected.
        let (locked, _dir1) = test_state(|_| {});
        let response = router(locked)
            .oneshot(get_request("/api/contents", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Public deployment: the same request succeeds.
        let (open, _dir2) = test_state(|config| config.public_contents = true);
        let response = router(open)
            .oneshot(get_request("/api/contents", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_even_on_public_endpoint() {
        let (state, _dir) = test_state(|config| config.public_contents = true);
        let app = router(state);

        let response = app
            .oneshot(get_request("/api/contents", Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn anonymous_comment_has_null_user_when_policy_allows() {
        let (state, _dir) = test_state(|config| config.public_comments = true);
        seed_admin(&state).await;
        let app = router(state);

        let (admin_token, _) = login(&app, "admin@local", "adminpass").await;
        let response = app
            .clone()
            .oneshot(multipart_upload(&admin_token, false))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/api/contents", Some(&admin_token)))
            .await
            .unwrap();
        let contents = response_json(response).await;
        let content_id = contents[0]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/comments",
                json!({"contentId": content_id, "text": "drive-by"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/api/admin/data", Some(&admin_token)))
            .await
            .unwrap();
        let data = response_json(response).await;
        assert!(data["comments"][0]["userId"].is_null());
    }

    #[tokio::test]
    async fn comment_on_unknown_content_is_404() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        app.clone()
            .oneshot(json_request(
                "/api/register",
                json!({"username": "carol", "email": "carol@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        let (token, _) = login(&app, "carol@x.com", "pw").await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "/api/comments",
                &token,
                json!({"contentId": "no-such-content", "text": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn checkout_without_provider_is_502() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        app.clone()
            .oneshot(json_request(
                "/api/register",
                json!({"username": "dave", "email": "dave@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        let (token, _) = login(&app, "dave@x.com", "pw").await;

        let response = app
            .clone()
            .oneshot(authed_json_request("/api/create-checkout-session", &token, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_endpoints_answer_without_auth() {
        let (state, _dir) = test_state(|_| {});
        let app = router(state);

        let response = app
            .clone()
            .oneshot(get_request("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/health/live", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
