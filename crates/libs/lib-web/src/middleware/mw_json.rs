//! # JSON Body Extractor
//!
//! [`JsonBody`] wraps axum's `Json` so that a body axum cannot read still
//! answers with the `{"errors":[...]}` validation shape instead of axum's
//! plain-text rejection.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use lib_core::{AppError, FieldError};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Request body parsed as JSON, rejected as [`AppError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("[JSON] Body rejected: {}", rejection.body_text());
                Err(AppError::Validation(vec![FieldError::message(
                    rejection_message(&rejection),
                )]))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Request body must be JSON",
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        _ => "Request body could not be read",
    }
}
