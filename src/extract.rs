use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections are rendered like any other client error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
