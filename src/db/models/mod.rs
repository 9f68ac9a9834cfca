pub mod api;
pub mod sprint;
pub mod task;
pub mod user;

pub use api::{ErrorDetail, ErrorResponse};
pub use sprint::{NewSprint, Sprint, SprintChangeset};
pub use task::{NewTask, Task, TaskChangeset, TaskRecord};
pub use user::{AuthUser, NewProfile, NewUser, Profile, ProfileChangeset, User, UserChangeset};
