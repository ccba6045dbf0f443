//! Service layer sitting between the HTTP handlers and the repository traits.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod members;
pub mod seed;
pub mod teams;

/// Errors surfaced by service functions.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request input rejected before reaching the repository.
    #[error("{0}")]
    Form(String),

    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
