// Application state for HTTP handlers
use crate::application::view::DashboardView;

pub struct AppState {
    pub view: DashboardView,
}
