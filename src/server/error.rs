use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::random::EmptyInputError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Reference data unavailable: {0}")]
    EmptyReferenceData(#[from] EmptyInputError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::EmptyReferenceData { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("{self}");

        (status, self.to_string()).into_response()
    }
}
