//! Actix-web handlers and the JSON error mapping they share.

use actix_web::HttpResponse;

use crate::dto::members::ErrorResponse;
use crate::services::ServiceError;

pub mod members;
pub mod teams;

/// Converts a service failure into the JSON error response sent to clients.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        ServiceError::Repository(err) => {
            log::error!("Repository failure while serving request: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}
