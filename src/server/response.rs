use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::convert::{ConversionError, Stage};

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Validation and fetch failures are client-correctable; extraction faults are ours.
pub fn status_for(stage: Stage) -> StatusCode {
    match stage {
        Stage::Validation | Stage::Fetch => StatusCode::BAD_REQUEST,
        Stage::Parse => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn plain_text(status: StatusCode, body: impl Into<String>) -> Response {
    let body: String = body.into();
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

/// 302 to a same-origin location.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        plain_text(status_for(self.stage()), self.to_string())
    }
}
