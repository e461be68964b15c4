/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (UserRepo, SessionCodec, CookieSigner) → Router 組み立て
 * - Middleware の適用 (request id / trace / limit / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repos::user_repo::InMemoryUserRepo;
use crate::services::{auth::build_session_codec, cookie::CookieSigner};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hello_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing; stderr may be hidden depending on how the process runs.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let users = Arc::new(InMemoryUserRepo::seeded());
    let sessions = build_session_codec(config);
    let cookies = CookieSigner::new(&config.cookie_secret)
        .map_err(|_| anyhow::anyhow!("invalid COOKIE_SECRET"))?;

    Ok(AppState::new(
        users,
        sessions,
        Arc::new(cookies),
        config.session_cookie.clone(),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        build_router(AppState::for_tests(), &Config::for_tests())
    }

    async fn body_text(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(res: Response) -> Value {
        serde_json::from_str(&body_text(res).await).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// `name=value` part of the first Set-Cookie header.
    fn set_cookie_pair(res: &Response) -> String {
        let raw = res.headers()[header::SET_COOKIE].to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn root_and_public() {
        let res = router().oneshot(get("/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Hi");

        let res = router().oneshot(get("/api/public")).await.unwrap();
        assert_eq!(
            body_json(res).await,
            json!({"message": "This is public information"})
        );
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let res = router().oneshot(get("/")).await.unwrap();
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn verify_secret_with_admin_secret() {
        let req = Request::builder()
            .uri("/api/verify-secret")
            .header(header::AUTHORIZATION, "Bearer admin-secret-123")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert_eq!(
            body["user"],
            json!({"id": 1, "username": "admin", "role": "admin"})
        );
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn verify_secret_rejects_wrong_and_missing() {
        let req = Request::builder()
            .uri("/api/verify-secret")
            .header(header::AUTHORIZATION, "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await, json!({"error": "Invalid token"}));

        let res = router().oneshot(get("/api/verify-secret")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await, json!({"error": "Bearer token required"}));

        let req = Request::builder()
            .uri("/api/verify-secret")
            .header(header::AUTHORIZATION, "Basic admin-secret-123")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(body_json(res).await, json!({"error": "Bearer token required"}));
    }

    #[tokio::test]
    async fn private_echoes_valid_body_and_rejects_invalid() {
        let creds = json!({"username": "user", "password": "user123"});
        let res = router()
            .oneshot(post_json("/api/private", creds.clone()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, creds);

        let res = router()
            .oneshot(post_json("/api/private", json!({"username": "user"})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(res).await["field"], "password");

        let res = router().oneshot(get("/api/private")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn headers_require_authorization() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/headers")
            .header(header::AUTHORIZATION, "anything")
            .header("x-demo", "1")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["authorization"], "anything");
        assert_eq!(body["x-demo"], "1");

        let req = Request::builder()
            .method("POST")
            .uri("/api/headers")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(res).await["location"], "headers");
    }

    #[tokio::test]
    async fn cookie_echoes_jar_and_sets_demo_cookie() {
        let req = Request::builder()
            .uri("/api/cookie")
            .header(header::COOKIE, "a=1; b=two")
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let raw = res.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert_eq!(raw, "name=elysia; Path=/; HttpOnly");
        assert_eq!(body_json(res).await, json!({"a": "1", "b": "two"}));
    }

    #[tokio::test]
    async fn protected_route_checks_role_by_username_only() {
        // The password is never checked.
        let res = router()
            .oneshot(post_json(
                "/api/protected_route",
                json!({"username": "admin", "password": "anything"}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(res).await, json!({"message": "Access granted"}));

        for username in ["user", "nobody"] {
            let res = router()
                .oneshot(post_json(
                    "/api/protected_route",
                    json!({"username": username, "password": "x"}),
                ))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(body_json(res).await, json!({"message": "Access denied"}));
        }
    }

    #[tokio::test]
    async fn sign_in_then_profile() {
        let res = router().oneshot(get("/api/jwt/bob")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let raw = res.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(raw.contains("Max-Age=3600"));
        assert!(raw.contains("HttpOnly"));
        let cookie = set_cookie_pair(&res);
        assert!(cookie.starts_with("auth="));
        assert!(body_text(res).await.starts_with("Sign in as "));

        let req = Request::builder()
            .uri("/api/profile")
            .header(header::COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Hello bob");
    }

    #[tokio::test]
    async fn profile_without_or_with_tampered_cookie_is_401() {
        let res = router().oneshot(get("/api/profile")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(res).await, "Unauthorized");

        let res = router().oneshot(get("/api/jwt/bob")).await.unwrap();
        let cookie = set_cookie_pair(&res);
        let tampered = cookie.replacen("auth=e", "auth=f", 1);
        assert_ne!(cookie, tampered);

        let req = Request::builder()
            .uri("/api/profile")
            .header(header::COOKIE, tampered.as_str())
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cookie_check_reports_session() {
        let res = router().oneshot(get("/api/cookie-check")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"authenticated": false}));

        let res = router().oneshot(get("/api/jwt/alice")).await.unwrap();
        let cookie = set_cookie_pair(&res);
        let signed_in = body_text(res).await;
        let token = signed_in.trim_start_matches("Sign in as ");

        let req = Request::builder()
            .uri("/api/cookie-check")
            .header(header::COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(
            body_json(res).await,
            json!({"authenticated": true, "token": token})
        );
    }

    #[tokio::test]
    async fn api_docs_are_served() {
        let res = router().oneshot(get("/api-docs/json")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await;
        assert_eq!(doc["openapi"], "3.0.3");
        assert!(doc["paths"]["/api/profile"]["get"].is_object());
    }

    #[tokio::test]
    async fn swagger_ui_points_at_json_document() {
        let res = router().oneshot(get("/api-docs")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let page = body_text(res).await;
        assert!(page.contains("SwaggerUIBundle"));
        assert!(page.contains(r#"url: "/api-docs/json""#));
    }
}
