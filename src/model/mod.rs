pub mod attendance;
pub mod employee;
pub mod role;
pub mod salary;
pub mod shift;
