// src/error.rs

use crate::repository::store_fault::StoreFault;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Department with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Specified parent department {0} does not exist")]
    ParentNotFound(i32),

    #[error("Specified department {0} does not exist")]
    DepartmentNotFound(i32),

    #[error("Cyclic dependency detected: department {department_id} cannot be placed under {parent_id}")]
    CyclicDependency { department_id: i32, parent_id: i32 },

    #[error("Cannot delete department {0} with employees")]
    HasEmployees(i32),

    #[error("Cannot delete department {0} with child departments")]
    HasChildren(i32),

    #[error("Departments table not found")]
    SchemaMissing,

    #[error("Failed to build department hierarchy: {0}")]
    HierarchyBuildFailure(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Concurrent modification conflict")]
    SerializationConflict,

    #[error("Database error: {0}")]
    DbErr(DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

// 制約違反以外のストアエラーの既定の変換（制約違反は各サービスで個別に分類する）
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match StoreFault::classify(&err) {
            StoreFault::UndefinedTable => AppError::SchemaMissing,
            StoreFault::SerializationFailure => AppError::SerializationConflict,
            StoreFault::Unavailable => AppError::StoreUnavailable(err.to_string()),
            _ => AppError::DbErr(err),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateName(_)
            | AppError::CyclicDependency { .. }
            | AppError::HasEmployees(_)
            | AppError::HasChildren(_)
            | AppError::SerializationConflict => StatusCode::CONFLICT,
            AppError::ParentNotFound(_) | AppError::DepartmentNotFound(_) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::BadRequest(_) | AppError::ValidationErrors(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SchemaMissing
            | AppError::HierarchyBuildFailure(_)
            | AppError::DbErr(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::DuplicateName(_) => "duplicate_name",
            AppError::ParentNotFound(_) => "parent_not_found",
            AppError::DepartmentNotFound(_) => "department_not_found",
            AppError::CyclicDependency { .. } => "cyclic_dependency",
            AppError::HasEmployees(_) => "has_employees",
            AppError::HasChildren(_) => "has_children",
            AppError::SchemaMissing => "schema_missing",
            AppError::HierarchyBuildFailure(_) => "hierarchy_build_failure",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::SerializationConflict => "serialization_conflict",
            AppError::DbErr(_) => "database_error",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::ValidationErrors(_) => "validation_errors",
            AppError::InternalServerError(_) => "internal_server_error",
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type().to_string();
        let detail = self.to_string();

        let error_response = match self {
            AppError::ValidationErrors(errors) => {
                let mut field_errors = HashMap::new();
                for error in &errors {
                    if let Some((field, message)) = error.split_once(": ") {
                        field_errors
                            .entry(field.to_string())
                            .or_insert_with(Vec::new)
                            .push(message.to_string());
                    }
                }
                let errors_array: Vec<serde_json::Value> =
                    errors.iter().map(|e| json!({"message": e})).collect();
                ErrorResponse {
                    success: false,
                    error: "Validation failed".to_string(),
                    message: "Validation failed".to_string(),
                    details: None,
                    validation_errors: Some(field_errors),
                    errors: Some(errors_array),
                    error_type,
                }
            }
            AppError::CyclicDependency {
                department_id,
                parent_id,
            } => {
                let message = "Cyclic dependency detected".to_string();
                ErrorResponse {
                    success: false,
                    error: message.clone(),
                    message,
                    details: Some(json!({
                        "department_id": department_id,
                        "parent_department_id": parent_id
                    })),
                    validation_errors: None,
                    errors: None,
                    error_type,
                }
            }
            // 内部詳細はサーバーログにのみ出す
            AppError::DbErr(_)
            | AppError::InternalServerError(_)
            | AppError::SchemaMissing
            | AppError::HierarchyBuildFailure(_)
            | AppError::StoreUnavailable(_) => {
                tracing::error!(error = %detail, error_type = %error_type, "Request failed");
                let message = if status == StatusCode::SERVICE_UNAVAILABLE {
                    "The database is currently unavailable".to_string()
                } else {
                    "An internal server error occurred".to_string()
                };
                ErrorResponse {
                    success: false,
                    error: message.clone(),
                    message,
                    details: None,
                    validation_errors: None,
                    errors: None,
                    error_type,
                }
            }
            _ => {
                let message = detail;
                ErrorResponse {
                    success: false,
                    error: message.clone(),
                    message,
                    details: None,
                    validation_errors: None,
                    errors: None,
                    error_type,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
    pub error_type: String,
}
