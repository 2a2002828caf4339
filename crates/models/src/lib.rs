pub mod classroom;
pub mod course;
pub mod patch;
pub mod requisite;
pub mod schedule;
pub mod term;
pub mod user;
