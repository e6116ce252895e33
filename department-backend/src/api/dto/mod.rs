pub mod department_dto;
pub mod employee_dto;
