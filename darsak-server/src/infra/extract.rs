use axum::extract::{FromRequestParts, Path};

use crate::infra::errors::AppError;

/// `Path` whose rejection uses the JSON error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
