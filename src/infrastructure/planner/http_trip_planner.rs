use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{TripPlanner, TripPlannerError};
use crate::domain::{TripPlan, TripRequest};

// Itinerary generation is the slowest external call in the pipeline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Hands the finalized request to the remote planning agent and passes its
/// plan back untouched.
pub struct HttpTripPlanner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTripPlanner {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl TripPlanner for HttpTripPlanner {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, TripPlannerError> {
        let url = format!("{}/plan", self.base_url.trim_end_matches('/'));

        tracing::debug!(city = %request.city, "Requesting trip plan");

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| TripPlannerError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TripPlannerError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let plan = response
            .json::<TripPlan>()
            .await
            .map_err(|e| TripPlannerError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::info!(city = %request.city, "Trip plan received");
        Ok(plan)
    }
}
