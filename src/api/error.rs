use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::error::{FetchError, PowError, RegistryError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Mining(#[from] PowError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("background worker unavailable")]
    Blocking(#[from] BlockingError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Registry(_) => StatusCode::BAD_REQUEST,
            ApiError::Mining(PowError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Mining(PowError::Exhausted { .. })
            | ApiError::Fetch(_)
            | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// JSON extractor config: malformed or incomplete bodies become a 400
/// before any handler runs.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        warn!("{} {} - rejected body: {}", req.method(), req.path(), err);
        ApiError::BadRequest(err.to_string()).into()
    })
}
