use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use thiserror::Error as ThisError;

use crate::views;

#[derive(Debug, ThisError)]
pub enum PadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("no database named `{0}` found")]
    UnknownDatabase(String),

    #[error("uploaded file has no header row")]
    EmptyCsv,
}

/// Fallback rendering for errors that escape a handler (extractor failures,
/// I/O on the data directory). Expected per-page failures never reach this:
/// handlers catch them and render the message inline with a 200, so the page
/// keeps accepting input.
impl IntoResponse for PadError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            PadError::Io(_) | PadError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PadError::Multipart(e) => e.status(),
            PadError::Csv(_)
            | PadError::MissingField(_)
            | PadError::UnknownDatabase(_)
            | PadError::EmptyCsv => StatusCode::BAD_REQUEST,
        };
        (status, Html(views::error_page(&self.to_string()))).into_response()
    }
}
