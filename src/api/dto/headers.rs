use crate::services::validation::{FieldKind, FieldSpec, HasSchema, Location, Schema};

/// Header schema for `POST /api/headers`.
#[derive(Debug)]
pub struct AuthorizationHeader;

impl HasSchema for AuthorizationHeader {
    const SCHEMA: Schema = Schema {
        location: Location::Headers,
        fields: &[FieldSpec::required("authorization", FieldKind::String)],
    };
}
