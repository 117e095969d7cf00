//! Custom Axum extractors
//!
//! Request input is validated here, before a handler runs.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{Page, ProductId, ValidationError};

/// Extract and validate a product id from path
pub struct ValidProductId(pub ProductId);

impl<S> FromRequestParts<S> for ValidProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::InvalidId { raw: e.body_text() }))?;

        Ok(Self(ProductId::parse(&raw)?))
    }
}

/// Extract the `start`/`count` listing window from the query string
///
/// Never rejects: unparsable values are clamped like missing ones. When a
/// key repeats, the first value wins.
pub struct Paging(pub Page);

impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Ok(Self(Page::from_raw(first("start"), first("count"))))
    }
}

/// JSON body decoded without requiring a `Content-Type` header
///
/// The body is buffered and dropped inside the extractor, so it is released
/// whether decoding succeeds or not.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidPayload {
                reason: e.body_text(),
            })
        })?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidPayload {
                    reason: e.to_string(),
                })
            })
    }
}
