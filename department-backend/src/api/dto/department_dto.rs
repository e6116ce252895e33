// department-backend/src/api/dto/department_dto.rs

use crate::domain::department_model::Model as Department;
use crate::utils::validation::{department, validate_not_empty_or_whitespace};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 部門作成リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartmentDto {
    #[validate(
        length(
            min = department::NAME_MIN_LENGTH,
            max = department::NAME_MAX_LENGTH,
            message = "Department name must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub name: String,

    #[serde(default)]
    pub parent_department_id: Option<i32>,
}

/// 部門更新リクエスト（`id` はパスのIDと一致している必要がある）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDepartmentDto {
    pub id: i32,

    #[validate(
        length(
            min = department::NAME_MIN_LENGTH,
            max = department::NAME_MAX_LENGTH,
            message = "Department name must be 1-100 characters"
        ),
        custom(function = validate_not_empty_or_whitespace)
    )]
    pub name: String,

    #[serde(default)]
    pub parent_department_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: i32,
    pub name: String,
    pub parent_department_id: Option<i32>,
}

impl From<Department> for DepartmentDto {
    fn from(model: Department) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_department_id: model.parent_department_id,
        }
    }
}

/// 作成されたリソースのID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDto {
    pub id: i32,
}
