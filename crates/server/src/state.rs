use database::CatalogStore;
use scheduler::ScheduleManager;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub schedules: Arc<ScheduleManager>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, schedules: ScheduleManager) -> Self {
        Self {
            catalog,
            schedules: Arc::new(schedules),
        }
    }
}
