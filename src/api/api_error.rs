use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Converts any error into an empty-bodied HTTP response. Only a failed API key comparison is
/// distinguished (403); every other failure is a 500 and is only described in the logs.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = match any_err.downcast_ref::<Error>() {
            Some(Error::AuthForbidden) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{any_err:#}");
        }
        status.into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
