use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` with rejections rendered through `AppError`, so malformed
/// bodies still get the `{"error": ...}` contract.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
