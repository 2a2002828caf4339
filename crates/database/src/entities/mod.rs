pub mod classroom;
pub mod course;
pub mod schedule;
pub mod user;

pub use classroom::Entity as Classrooms;
pub use course::Entity as Courses;
pub use schedule::Entity as Schedules;
pub use user::Entity as Users;
