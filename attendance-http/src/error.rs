use attendance_registry::Error as RegistryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::wrappers::Confirmation;

// Error
pub enum Error {
    BadRequest(String),
    NotFound(String),
    Unavailable(String),
    Internal(String),
}

impl From<RegistryError> for Error {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::InvalidInput(message) => Self::BadRequest(message),
            RegistryError::NotFound(message) => Self::NotFound(message),
            RegistryError::Unavailable(message) => Self::Unavailable(message),
            RegistryError::Storage(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Error::Unavailable(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            Error::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(Confirmation { message })).into_response()
    }
}
