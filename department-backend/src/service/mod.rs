pub mod department_service;
pub mod employee_service;
