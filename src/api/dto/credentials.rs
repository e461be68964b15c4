/*
 * Responsibility
 * - username / password を持つ request body (private, protected_route)
 * - schema 記述 (HasSchema) を型と一緒に置く
 */
use serde::{Deserialize, Serialize};

use crate::services::validation::{FieldKind, FieldSpec, HasSchema, Location, Schema};

#[derive(Clone, Deserialize, Serialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HasSchema for CredentialsRequest {
    const SCHEMA: Schema = Schema {
        location: Location::Body,
        fields: &[
            FieldSpec::required("username", FieldKind::String),
            FieldSpec::required("password", FieldKind::String),
        ],
    };
}
