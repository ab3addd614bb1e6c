//! Routed pages

mod dashboard;
mod login;
mod projects;
mod signup;
mod task_board;
mod task_detail;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use projects::ProjectsPage;
pub use signup::SignupPage;
pub use task_board::TaskBoardPage;
pub use task_detail::TaskDetailPage;
