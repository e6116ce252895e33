pub mod department_hierarchy;
pub mod department_model;
pub mod employee_model;
