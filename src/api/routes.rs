/*
 * Responsibility
 * - URL 構造を (method, path, handler, validation, security) の登録表として定義
 * - 登録表から Router と OpenAPI document の両方を組み立てる
 * - Bearer が必要な route はここで guard を掛ける
 */
use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{MethodRouter, get, post},
};

use crate::api::dto::{credentials::CredentialsRequest, headers::AuthorizationHeader};
use crate::api::handlers::{
    cookie::echo_cookies,
    docs::{openapi_json, swagger_ui},
    headers::echo_headers,
    protected::protected_route,
    public::{private_echo, public_info},
    root::hi,
    secret::verify_secret,
    session::{cookie_check, profile, sign_in},
};
use crate::api::openapi;
use crate::middleware::auth::bearer;
use crate::services::validation::{HasSchema, Schema};
use crate::state::AppState;

pub const DOCS_UI_PATH: &str = "/api-docs";
pub const DOCS_PATH: &str = "/api-docs/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    None,
    Bearer,
    SessionCookie,
}

/// One registered path. `methods` and `handler` must agree.
pub struct RouteDef {
    pub path: &'static str,
    pub methods: Vec<Method>,
    pub summary: &'static str,
    pub security: Security,
    pub validation: Option<Schema>,
    pub handler: MethodRouter<AppState>,
}

impl RouteDef {
    fn new(path: &'static str, methods: Vec<Method>, handler: MethodRouter<AppState>) -> Self {
        Self {
            path,
            methods,
            summary: "",
            security: Security::None,
            validation: None,
            handler,
        }
    }

    fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    fn security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    fn validated<T: HasSchema>(mut self) -> Self {
        self.validation = Some(T::SCHEMA);
        self
    }
}

pub fn route_table(state: &AppState) -> Vec<RouteDef> {
    vec![
        RouteDef::new("/", vec![Method::GET], get(hi)).summary("Greeting"),
        RouteDef::new("/api/public", vec![Method::GET], get(public_info))
            .summary("Public information"),
        RouteDef::new(
            "/api/private",
            vec![Method::GET, Method::POST],
            get(private_echo).post(private_echo),
        )
        .summary("Echo validated credentials")
        .validated::<CredentialsRequest>(),
        RouteDef::new(
            "/api/verify-secret",
            vec![Method::GET],
            bearer::guard(get(verify_secret), state.clone()),
        )
        .summary("Verify a bearer secret")
        .security(Security::Bearer),
        RouteDef::new("/api/headers", vec![Method::POST], post(echo_headers))
            .summary("Echo validated headers")
            .validated::<AuthorizationHeader>(),
        RouteDef::new("/api/cookie", vec![Method::GET], get(echo_cookies))
            .summary("Echo cookies and set a demo cookie"),
        RouteDef::new(
            "/api/protected_route",
            vec![Method::POST],
            post(protected_route),
        )
        .summary("Admin role gate by username lookup")
        .validated::<CredentialsRequest>(),
        RouteDef::new("/api/jwt/{name}", vec![Method::GET], get(sign_in))
            .summary("Sign in and set the session cookie"),
        RouteDef::new("/api/profile", vec![Method::GET], get(profile))
            .summary("Greet the session holder")
            .security(Security::SessionCookie),
        RouteDef::new("/api/cookie-check", vec![Method::GET], get(cookie_check))
            .summary("Report whether the session cookie verifies"),
    ]
}

pub fn routes(state: AppState) -> Router<AppState> {
    let table = route_table(&state);
    let doc = Arc::new(openapi::document(&table));

    let router = table
        .into_iter()
        .fold(Router::new(), |router, def| router.route(def.path, def.handler));

    router
        .route(DOCS_UI_PATH, get(|| swagger_ui(DOCS_PATH)))
        .route(DOCS_PATH, get(move || openapi_json(doc.clone())))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn paths_are_registered_once() {
        let table = route_table(&AppState::for_tests());
        let mut seen = HashSet::new();
        for def in &table {
            assert!(seen.insert(def.path), "duplicate path {}", def.path);
            assert!(!def.methods.is_empty());
            assert!(!def.summary.is_empty());
        }
        assert!(!seen.contains(DOCS_PATH));
        assert!(!seen.contains(DOCS_UI_PATH));
    }

    fn find<'a>(table: &'a [RouteDef], path: &str) -> &'a RouteDef {
        table.iter().find(|d| d.path == path).unwrap()
    }

    #[test]
    fn guarded_and_validated_routes() {
        let table = route_table(&AppState::for_tests());

        assert_eq!(find(&table, "/api/verify-secret").security, Security::Bearer);
        assert_eq!(find(&table, "/api/profile").security, Security::SessionCookie);
        assert!(find(&table, "/api/private").validation.is_some());
        assert!(find(&table, "/api/headers").validation.is_some());
        assert!(find(&table, "/api/protected_route").validation.is_some());
        assert!(find(&table, "/api/public").validation.is_none());
    }
}
