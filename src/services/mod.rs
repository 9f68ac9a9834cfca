pub mod sprints_service;
pub mod tasks_service;
pub mod users_service;

pub use sprints_service::SprintsService;
pub use tasks_service::TasksService;
pub use users_service::UsersService;
