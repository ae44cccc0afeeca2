use async_trait::async_trait;

use crate::domain::{TripPlan, TripRequest};

#[async_trait]
pub trait TripPlanner: Send + Sync {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, TripPlannerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TripPlannerError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
