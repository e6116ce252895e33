// department-backend/src/utils/validation.rs

//! 共通バリデーション定数とカスタムバリデーション関数

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// 部門の制約
pub mod department {
    pub const NAME_MIN_LENGTH: u64 = 1;
    pub const NAME_MAX_LENGTH: u64 = 100;
}

/// 従業員の制約
pub mod employee {
    pub const NAME_MIN_LENGTH: u64 = 1;
    pub const NAME_MAX_LENGTH: u64 = 100;
    pub const PHONE_MIN_LENGTH: u64 = 1;
    pub const PHONE_MAX_LENGTH: u64 = 32;
    pub const POSITION_MIN_LENGTH: u64 = 1;
    pub const POSITION_MAX_LENGTH: u64 = 100;
}

/// 電話番号: 数字・空白・ハイフン・括弧と先頭の +
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("Invalid phone regex"));

/// 文字列が空白のみでないかをチェック
pub fn validate_not_empty_or_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("empty_or_whitespace");
        error.message = Some("Field cannot be empty or contain only whitespace".into());
        return Err(error);
    }
    Ok(())
}

/// 電話番号の形式をバリデーション
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !PHONE_REGEX.is_match(phone) || !phone.chars().any(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("invalid_phone_format");
        error.message = Some("Phone may only contain digits, spaces, '-', '(', ')' and a leading '+'".into());
        return Err(error);
    }
    Ok(())
}
