use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};

use crate::core::error::AppError;

/// Multipart extractor that answers a malformed request with the standard
/// error envelope instead of axum's plain-text rejection
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(AppError::BadRequest(format!(
                "Expected multipart/form-data: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Map a multipart read failure to an application error.
///
/// Bodies over the route's size limit surface as 413.
pub fn multipart_error(err: MultipartError, what: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload too large: {}", err.body_text()))
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", what, err.body_text()))
    }
}
