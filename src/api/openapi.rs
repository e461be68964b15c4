/*
 * Responsibility
 * - 登録表 (RouteDef) から OpenAPI 3 document を生成する
 * - bearerAuth (http / bearer / JWT) と session cookie の security scheme を宣言
 */
use serde_json::{Map, Value, json};

use crate::api::handlers::session::SESSION_COOKIE;
use crate::api::routes::{RouteDef, Security};
use crate::services::validation::Location;

const TITLE: &str = "hello-auth API Documentation";
const VERSION: &str = "1.0.0";

pub fn document(routes: &[RouteDef]) -> Value {
    let mut paths = Map::new();

    for def in routes {
        let mut item = Map::new();
        for method in &def.methods {
            item.insert(method.as_str().to_ascii_lowercase(), operation(def));
        }
        paths.insert(def.path.to_string(), Value::Object(item));
    }

    json!({
        "openapi": "3.0.3",
        "info": { "title": TITLE, "version": VERSION },
        "paths": paths,
        "components": {
            "securitySchemes": {
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT",
                },
                "sessionCookie": {
                    "type": "apiKey",
                    "in": "cookie",
                    "name": SESSION_COOKIE,
                },
            },
        },
    })
}

fn operation(def: &RouteDef) -> Value {
    let mut op = Map::new();
    op.insert("summary".into(), json!(def.summary));

    let mut parameters: Vec<Value> = path_params(def.path)
        .map(|name| json!({ "name": name, "in": "path", "required": true, "schema": { "type": "string" } }))
        .collect();

    let mut responses = Map::new();
    responses.insert("200".into(), json!({ "description": "OK" }));

    match def.security {
        Security::None => {}
        Security::Bearer => {
            op.insert("security".into(), json!([{ "bearerAuth": [] }]));
            responses.insert("401".into(), json!({ "description": "Unauthorized" }));
        }
        Security::SessionCookie => {
            op.insert("security".into(), json!([{ "sessionCookie": [] }]));
            responses.insert("401".into(), json!({ "description": "Unauthorized" }));
        }
    }

    if let Some(schema) = &def.validation {
        match schema.location {
            Location::Body => {
                op.insert(
                    "requestBody".into(),
                    json!({
                        "required": true,
                        "content": { "application/json": { "schema": schema.to_json_schema() } },
                    }),
                );
            }
            Location::Headers => {
                parameters.extend(schema.fields.iter().map(|field| {
                    json!({
                        "name": field.name,
                        "in": "header",
                        "required": field.required,
                        "schema": { "type": field.kind.json_type() },
                    })
                }));
            }
        }
        responses.insert("422".into(), json!({ "description": "Validation failed" }));
    }

    if !parameters.is_empty() {
        op.insert("parameters".into(), Value::Array(parameters));
    }
    op.insert("responses".into(), Value::Object(responses));

    Value::Object(op)
}

/// `{name}` segments of an axum path.
fn path_params(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter_map(|seg| seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
}
