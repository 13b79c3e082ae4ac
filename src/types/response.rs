use actix_web::{http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::types::error::AppError;

/// Success side of every handler; failures go through [`AppError`].
pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
    EmptyOk,
    NoContent,
}

impl<T> ApiResponse<T> {
    fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Ok(_) | ApiResponse::EmptyOk => StatusCode::OK,
            ApiResponse::Created(_) => StatusCode::CREATED,
            ApiResponse::NoContent => StatusCode::NO_CONTENT,
        }
    }

    fn into_body(self) -> Option<T> {
        match self {
            ApiResponse::Ok(v) | ApiResponse::Created(v) => Some(v),
            ApiResponse::EmptyOk | ApiResponse::NoContent => None,
        }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status());
        match self.into_body() {
            Some(body) => builder.json(body),
            None => builder.finish(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
