//! Extractors that turn malformed requests into validation errors.
//!
//! Axum's own rejections answer with plain text; these report through
//! [`ApiError`] so every 400 has the same JSON shape.

use axum::{
    async_trait,
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::common::{FieldErrors, Validate};
use crate::server::error::ApiError;

/// JSON body that has been deserialized and passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_errors)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters; an unparseable id is reported under its parameter name.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                let first_param = RawPathParams::from_request_parts(parts, state)
                    .await
                    .ok()
                    .and_then(|params| params.iter().next().map(|(key, _)| key.to_string()));
                Err(path_errors(rejection, first_param.as_deref()).into())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_errors)?;
        Ok(Self(value))
    }
}

fn json_errors(rejection: JsonRejection) -> FieldErrors {
    match rejection {
        JsonRejection::JsonDataError(err) => data_errors(&err.body_text()),
        other => FieldErrors::single("body", other.body_text()),
    }
}

/// Keys a deserialization failure by the field serde names in the message,
/// falling back to `body` when the failure is at the document root.
fn data_errors(text: &str) -> FieldErrors {
    let detail = text
        .split_once(DATA_ERROR_PREFIX)
        .map_or(text, |(_, rest)| rest);
    let (path, message) = match detail.split_once(": ") {
        Some((path, message)) if is_field_path(path) => (Some(field_key(path)), message),
        _ => (None, detail),
    };

    match (path, missing_field(message)) {
        (Some(path), Some(field)) => FieldErrors::single(&format!("{path}.{field}"), "Required"),
        (None, Some(field)) => FieldErrors::single(field, "Required"),
        (Some(path), None) => FieldErrors::single(&path, message),
        (None, None) => FieldErrors::single("body", text),
    }
}

/// `sources[0].label` -> `sources.0.label`, matching the keys `Validate` emits.
fn field_key(path: &str) -> String {
    path.replace('[', ".").replace(']', "")
}

const DATA_ERROR_PREFIX: &str = "into the target type: ";

fn is_field_path(path: &str) -> bool {
    !path.is_empty() && !path.contains(char::is_whitespace) && path != "?"
}

/// Every path parameter in this API is an id, so any parse failure is
/// reported as an invalid uuid under the parameter's name.
fn path_errors(rejection: PathRejection, first_param: Option<&str>) -> FieldErrors {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::ParseErrorAtKey { key, .. } => FieldErrors::single(key, "Invalid uuid"),
            _ => FieldErrors::single(first_param.unwrap_or("params"), "Invalid uuid"),
        },
        other => FieldErrors::single("params", other.body_text()),
    }
}

fn query_errors(rejection: QueryRejection) -> FieldErrors {
    FieldErrors::single("query", rejection.body_text())
}

/// Pulls the field name out of serde's "missing field `name`" message.
fn missing_field(text: &str) -> Option<&str> {
    let start = text.find("missing field `")? + "missing field `".len();
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}
