//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month in a request did not match a calendar month.
    ///
    /// Accepted values are full English month names, three letter
    /// abbreviations and the numbers 1 to 12, in any letter case.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The page number or page size in a request was less than one.
    #[error("invalid pagination: page {page} and perPage {per_page} must both be at least 1")]
    InvalidPagination {
        /// The requested page number.
        page: u64,
        /// The requested page size.
        per_page: u64,
    },

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The seed data could not be fetched or decoded.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch seed data: {0}")]
    SeedSource(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SeedSource(value.to_string())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Error::InvalidMonth(_) | Error::InvalidPagination { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::SeedSource(ref reason) => {
                tracing::error!("Seeding failed: {reason}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            // Store errors are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}
