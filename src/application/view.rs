// Reactive view - Owns the current selection and re-renders on every change
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::InvalidRegionError;
use crate::domain::unemployment::SelectionState;
use tokio::sync::RwLock;

pub struct DashboardView {
    service: DashboardService,
    selection: RwLock<SelectionState>,
}

impl DashboardView {
    pub fn new(service: DashboardService, initial: SelectionState) -> Self {
        Self {
            service,
            selection: RwLock::new(initial),
        }
    }

    pub fn service(&self) -> &DashboardService {
        &self.service
    }

    pub async fn selection(&self) -> SelectionState {
        self.selection.read().await.clone()
    }

    /// Render the current selection without changing it.
    pub async fn current(&self) -> Dashboard {
        let selection = self.selection.read().await;
        self.service.render(&selection)
    }

    /// Handle a selector event. An unknown region leaves the selection untouched.
    pub async fn on_region_selected(&self, region: &str) -> Result<Dashboard, InvalidRegionError> {
        // Held across validate, update and render so cycles never interleave
        let mut selection = self.selection.write().await;
        let next = self.service.resolve_selection(region)?;

        if *selection != next {
            tracing::debug!(from = selection.label(), to = next.label(), "Selection changed");
        }
        *selection = next;

        Ok(self.service.render(&selection))
    }
}
