// department-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使用するエラー処理パターンを提供します。

use crate::error::AppError;
use tracing::{error, warn};
use validator::ValidationErrors;

// =============================================================================
// バリデーションエラー処理の統一
// =============================================================================

/// validatorのValidationErrorsをAppErrorに変換する統一処理
///
/// # Arguments
/// * `validation_errors` - validator crate からのバリデーションエラー
/// * `context` - エラーが発生したコンテキスト（ログ用）
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    warn!(
        context = %context,
        error_count = validation_errors.field_errors().len(),
        "Validation failed"
    );

    let mut errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| "Invalid value".to_string(), |cow| cow.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    // HashMap 由来の順序を固定する
    errors.sort();

    AppError::ValidationErrors(errors)
}

// =============================================================================
// ログ付きエラー変換パターン
// =============================================================================

/// 内部サーバーエラーをログ付きで生成
pub fn internal_server_error<E: std::fmt::Display>(
    error: E,
    context: &str,
    user_message: &str,
) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::InternalServerError(user_message.to_string())
}

/// リソース未発見エラーをログ付きで生成
pub fn not_found_error(resource: &str, identifier: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        resource = %resource,
        identifier = %identifier,
        "Resource not found"
    );
    AppError::NotFound(format!(
        "{} with identifier {} not found",
        resource, identifier
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct TestStruct {
        #[validate(length(min = 3, max = 10))]
        name: String,
        #[validate(length(min = 1, message = "Phone is required"))]
        phone: String,
    }

    #[test]
    fn test_convert_validation_errors() {
        let test_data = TestStruct {
            name: "ab".to_string(),
            phone: String::new(),
        };

        let validation_errors = test_data.validate().unwrap_err();
        let app_error = convert_validation_errors(validation_errors, "test");

        match app_error {
            AppError::ValidationErrors(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.starts_with("name: ")));
                assert!(errors.contains(&"phone: Phone is required".to_string()));
            }
            _ => panic!("Expected ValidationErrors"),
        }
    }

    #[test]
    fn test_internal_server_error_hides_cause() {
        let error = internal_server_error("socket closed", "test", "Something went wrong");
        match error {
            AppError::InternalServerError(message) => {
                assert_eq!(message, "Something went wrong");
            }
            _ => panic!("Expected InternalServerError"),
        }
    }

    #[test]
    fn test_not_found_error() {
        let error = not_found_error("Department", "123", "department handler");
        match error {
            AppError::NotFound(message) => {
                assert_eq!(message, "Department with identifier 123 not found");
            }
            _ => panic!("Expected NotFound error"),
        }
    }
}
