use serde::{Deserialize, Serialize};

/// Finalized, fully-populated planning request handed to the external agent.
///
/// Only the request assembler constructs this; by then `end_date` is on or
/// after `start_date` and `travel_days` agrees with the date span whenever it
/// was derived from one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub travel_days: u32,
    pub transportation: String,
    pub accommodation: String,
    pub preferences: Vec<String>,
    pub free_text_input: String,
}
