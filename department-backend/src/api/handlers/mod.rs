// src/api/handlers/mod.rs

use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub mod department_handler;
pub mod employee_handler;
pub mod system_handler;

/// 整数IDのパス抽出器（不正な値はバリデーションエラーとして返す）
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(path_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::ValidationErrors(vec!["Invalid path parameter".to_string()]))?;

        let id = path_str.parse::<i32>().map_err(|_| {
            AppError::ValidationErrors(vec![format!("id: Invalid id format: '{}'", path_str)])
        })?;

        Ok(IdPath(id))
    }
}
