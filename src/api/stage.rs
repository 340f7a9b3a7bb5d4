use crate::api::api_error::APIError;
use crate::auth::Authorization;
use crate::error::Error;
use axum::response::{IntoResponse, Response};

/// The result of one step of the update pipeline: either carry on with the next step, or stop
/// and answer the client with the given response.
pub(super) enum Stage {
    Continue,
    Respond(Response),
}

impl From<Result<Authorization, Error>> for Stage {
    fn from(res: Result<Authorization, Error>) -> Self {
        match res {
            Ok(Authorization::Granted) => Stage::Continue,
            Ok(Authorization::Denied) => {
                Stage::Respond(APIError::from(Error::AuthForbidden).into_response())
            }
            Err(err) => Stage::Respond(APIError::from(err).into_response()),
        }
    }
}

impl From<Result<(), Error>> for Stage {
    fn from(res: Result<(), Error>) -> Self {
        match res {
            Ok(()) => Stage::Continue,
            Err(err) => Stage::Respond(APIError::from(err).into_response()),
        }
    }
}
