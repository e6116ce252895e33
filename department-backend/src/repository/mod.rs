pub mod department_repository;
pub mod employee_repository;
pub mod store_fault;
