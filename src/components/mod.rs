//! UI Components
//!
//! Leptos views. Components read the store and raise intents on
//! `AppContext`; none of them writes state directly.

mod modal;
mod status_badge;
mod notice_banner;
mod delete_confirm_button;
mod sidebar;
mod login_panel;
mod change_password_modal;
mod dashboard;
mod station_history_modal;
mod task_list;
mod edit_task_modal;
mod create_task_modal;
mod task_history_modal;
mod calendar_view;
mod admin_panel;

pub use modal::Modal;
pub use status_badge::StatusBadge;
pub use notice_banner::NoticeBanner;
pub use delete_confirm_button::DeleteConfirmButton;
pub use sidebar::{Sidebar, Tab};
pub use login_panel::LoginPanel;
pub use change_password_modal::ChangePasswordModal;
pub use dashboard::Dashboard;
pub use station_history_modal::StationHistoryModal;
pub use task_list::TaskList;
pub use edit_task_modal::EditTaskModal;
pub use create_task_modal::CreateTaskModal;
pub use task_history_modal::TaskHistoryModal;
pub use calendar_view::CalendarView;
pub use admin_panel::AdminPanel;
