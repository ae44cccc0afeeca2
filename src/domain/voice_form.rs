use serde::{Deserialize, Serialize};

pub const FIELD_CITY: &str = "city";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";
pub const FIELD_TRAVEL_DAYS: &str = "travel_days";

/// Partially-filled trip form inferred from a voice transcript.
///
/// Once normalized, `start_date`/`end_date` hold ISO-8601 calendar dates,
/// `travel_days` is at least 1, and `preferences` is free of empty or
/// duplicate entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceFormSuggestion {
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub travel_days: Option<u32>,
    pub transportation: Option<String>,
    pub accommodation: Option<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    pub free_text_input: Option<String>,
}

impl VoiceFormSuggestion {
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.travel_days.is_none()
            && self.transportation.is_none()
            && self.accommodation.is_none()
            && self.preferences.is_empty()
            && self.free_text_input.is_none()
    }
}
