pub mod actor;
pub mod cors;
pub mod faults;
