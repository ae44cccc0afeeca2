use std::sync::Arc;

use crate::application::ports::{LlmClient, TripPlanner};
use crate::application::services::VoicePlanningService;
use crate::presentation::config::Settings;

pub struct AppState<L, P>
where
    L: LlmClient,
    P: TripPlanner,
{
    pub voice_service: Arc<VoicePlanningService<L, P>>,
    pub settings: Settings,
}

impl<L, P> Clone for AppState<L, P>
where
    L: LlmClient,
    P: TripPlanner,
{
    fn clone(&self) -> Self {
        Self {
            voice_service: Arc::clone(&self.voice_service),
            settings: self.settings.clone(),
        }
    }
}
