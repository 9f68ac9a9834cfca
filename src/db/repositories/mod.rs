pub mod sprints;
pub mod tasks;
pub mod users;

pub use sprints::SprintsRepo;
pub use tasks::{TaskFilters, TasksRepo};
pub use users::UsersRepo;
