use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 子部門から親部門への外部キー制約名（マイグレーションと一致させる）
pub const PARENT_FOREIGN_KEY: &str = "fk_departments_parent_department_id";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub parent_department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentDepartmentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ParentDepartment,
    #[sea_orm(has_many = "super::employee_model::Entity")]
    Employees,
}

impl Related<super::employee_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_root_department(&self) -> bool {
        self.parent_department_id.is_none()
    }
}
