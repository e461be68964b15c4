use std::marker::PhantomData;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;
use crate::services::validation::{
    HasSchema, Location, ValidationError, validate_headers, validate_json,
};

/// JSON body checked against `T::SCHEMA` before deserializing into `T`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + HasSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection, "request body is not JSON");
                ValidationError::new(Location::Body, "", rejection.body_text())
            })?;

        validate_json(&T::SCHEMA, &value).inspect_err(|err| {
            tracing::warn!(error = %err, "request body failed validation");
        })?;

        let body = serde_json::from_value(value)
            .map_err(|e| ValidationError::new(Location::Body, "", e.to_string()))?;

        Ok(Self(body))
    }
}

/// Request headers checked against `T::SCHEMA`. `T` only names the schema.
#[derive(Debug)]
pub struct ValidatedHeaders<T> {
    pub headers: HeaderMap,
    _schema: PhantomData<T>,
}

impl<S, T> FromRequestParts<S> for ValidatedHeaders<T>
where
    S: Send + Sync,
    T: HasSchema + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        validate_headers(&T::SCHEMA, &parts.headers).inspect_err(|err| {
            tracing::warn!(error = %err, "request headers failed validation");
        })?;

        Ok(Self {
            headers: parts.headers.clone(),
            _schema: PhantomData,
        })
    }
}
