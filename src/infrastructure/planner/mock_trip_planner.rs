use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::{TripPlanner, TripPlannerError};
use crate::domain::{TripPlan, TripRequest};

/// Echoes the request back as a minimal plan.
pub struct MockTripPlanner;

#[async_trait]
impl TripPlanner for MockTripPlanner {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, TripPlannerError> {
        Ok(TripPlan(json!({
            "city": request.city,
            "start_date": request.start_date,
            "end_date": request.end_date,
            "travel_days": request.travel_days,
            "days": [],
        })))
    }
}
