// department-backend/src/api/dto/employee_dto.rs

use crate::domain::employee_model::Model as Employee;
use crate::repository::employee_repository::EmployeeFields;
use crate::utils::validation::{employee, validate_not_empty_or_whitespace, validate_phone};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 従業員作成リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeDto {
    #[validate(
        length(
            min = employee::NAME_MIN_LENGTH,
            max = employee::NAME_MAX_LENGTH,
            message = "Name must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub name: String,

    #[validate(
        length(
            min = employee::PHONE_MIN_LENGTH,
            max = employee::PHONE_MAX_LENGTH,
            message = "Phone must be 1-32 characters"
        ),
        custom(function = validate_phone)
    )]
    pub phone: String,

    #[validate(
        length(
            min = employee::POSITION_MIN_LENGTH,
            max = employee::POSITION_MAX_LENGTH,
            message = "Position must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub position: String,

    pub department_id: i32,
}

impl From<CreateEmployeeDto> for EmployeeFields {
    fn from(dto: CreateEmployeeDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            position: dto.position,
            department_id: dto.department_id,
        }
    }
}

/// 従業員更新リクエスト（`id` はパスのIDと一致している必要がある）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeDto {
    pub id: i32,

    #[validate(
        length(
            min = employee::NAME_MIN_LENGTH,
            max = employee::NAME_MAX_LENGTH,
            message = "Name must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub name: String,

    #[validate(
        length(
            min = employee::PHONE_MIN_LENGTH,
            max = employee::PHONE_MAX_LENGTH,
            message = "Phone must be 1-32 characters"
        ),
        custom(function = validate_phone)
    )]
    pub phone: String,

    #[validate(
        length(
            min = employee::POSITION_MIN_LENGTH,
            max = employee::POSITION_MAX_LENGTH,
            message = "Position must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub position: String,

    pub department_id: i32,
}

impl From<UpdateEmployeeDto> for EmployeeFields {
    fn from(dto: UpdateEmployeeDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            position: dto.position,
            department_id: dto.department_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub position: String,
    pub department_id: i32,
}

impl From<Employee> for EmployeeDto {
    fn from(model: Employee) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            position: model.position,
            department_id: model.department_id,
        }
    }
}

/// `GET /employees/search?query=...`
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeSearchQuery {
    #[serde(default)]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_employee() -> CreateEmployeeDto {
        CreateEmployeeDto {
            name: "Ivan Petrov".to_string(),
            phone: "+7 (900) 123-45-67".to_string(),
            position: "Engineer".to_string(),
            department_id: 1,
        }
    }

    #[test]
    fn test_valid_employee_passes() {
        assert!(valid_employee().validate().is_ok());
    }

    #[test]
    fn test_invalid_phone_rejected() {
        let mut dto = valid_employee();
        dto.phone = "not a phone".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));

        dto.phone = "1".repeat(33);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_blank_position_rejected() {
        let mut dto = valid_employee();
        dto.position = " ".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("position"));
    }
}
