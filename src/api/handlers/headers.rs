use std::collections::BTreeMap;

use axum::Json;

use crate::api::dto::headers::AuthorizationHeader;
use crate::api::extractors::ValidatedHeaders;

/// POST /api/headers: echoes request headers once the header schema passed.
pub async fn echo_headers(
    extracted: ValidatedHeaders<AuthorizationHeader>,
) -> Json<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for (name, value) in &extracted.headers {
        // Repeated headers keep the first value.
        out.entry(name.as_str().to_string())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(out)
}
