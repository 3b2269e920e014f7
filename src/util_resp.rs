use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use hypertext::Rendered;

use crate::source::SourceError;

pub fn err_not_found() -> StandardResponse {
    Err(FailureResponse::NotFound(()))
}

pub fn success(html: Rendered<String>) -> StandardResponse {
    Ok(SuccessResponse::Success(html))
}

pub type StandardResponse = Result<SuccessResponse, FailureResponse>;

pub enum SuccessResponse {
    Success(Rendered<String>),
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        match self {
            SuccessResponse::Success(html) => {
                Html(html.into_inner()).into_response()
            }
        }
    }
}

#[derive(Debug)]
pub enum FailureResponse {
    NotFound(()),
    /// The upstream collections could not be loaded.
    Unavailable(String),
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        match self {
            FailureResponse::NotFound(()) => {
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
            FailureResponse::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg).into_response()
            }
        }
    }
}

impl From<SourceError> for FailureResponse {
    fn from(e: SourceError) -> Self {
        tracing::error!("data source failed: {e}");
        FailureResponse::Unavailable(
            "standings data is temporarily unavailable".to_string(),
        )
    }
}
