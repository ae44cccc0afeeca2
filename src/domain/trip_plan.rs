use serde::{Deserialize, Serialize};

/// Opaque itinerary produced by the external planning agent, passed through
/// to callers without inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripPlan(pub serde_json::Value);
