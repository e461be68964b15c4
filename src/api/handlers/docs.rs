use std::sync::Arc;

use axum::{Json, response::Html};
use serde_json::Value;

const SWAGGER_UI_VERSION: &str = "5";

/// GET /api-docs/json. The document is generated once from the route table.
pub async fn openapi_json(doc: Arc<Value>) -> Json<Value> {
    Json(doc.as_ref().clone())
}

/// GET /api-docs: Swagger UI page that loads the JSON document from `spec_url`.
pub async fn swagger_ui(spec_url: &'static str) -> Html<String> {
    Html(format!(
        r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>hello-auth API Documentation</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        v = SWAGGER_UI_VERSION,
    ))
}
