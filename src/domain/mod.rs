mod trip_plan;
mod trip_request;
mod voice_form;

pub use trip_plan::TripPlan;
pub use trip_request::TripRequest;
pub use voice_form::{
    FIELD_CITY, FIELD_END_DATE, FIELD_START_DATE, FIELD_TRAVEL_DAYS, VoiceFormSuggestion,
};
