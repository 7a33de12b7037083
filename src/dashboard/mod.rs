pub mod lateness;
pub mod salary;
