/// Risk scoring core: the register's domain model and the severity policy
pub mod domain;
pub mod policies;
