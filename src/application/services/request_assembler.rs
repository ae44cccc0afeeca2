use super::form_normalizer;
use crate::domain::{
    FIELD_END_DATE, FIELD_START_DATE, FIELD_TRAVEL_DAYS, TripRequest, VoiceFormSuggestion,
};

pub const DEFAULT_TRANSPORTATION: &str = "公共交通";
pub const DEFAULT_ACCOMMODATION: &str = "舒适型酒店";

#[derive(Debug, thiserror::Error)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct IncompleteForm {
    pub missing: Vec<String>,
}

/// Finalize a suggestion into a planning request.
///
/// Re-runs the same inference chain as normalization, so an already
/// consistent form passes through unchanged, then substitutes defaults for
/// the optional fields the planner requires.
pub fn assemble(suggestion: &VoiceFormSuggestion) -> Result<TripRequest, IncompleteForm> {
    let mut form = suggestion.clone();
    form_normalizer::renormalize(&mut form);

    let missing = form_normalizer::missing_fields(&form, true);
    if !missing.is_empty() {
        return Err(IncompleteForm { missing });
    }

    let start = form
        .start_date
        .as_deref()
        .and_then(form_normalizer::parse_lenient_date)
        .ok_or_else(|| IncompleteForm {
            missing: vec![FIELD_START_DATE.to_string()],
        })?;
    let end = form
        .end_date
        .as_deref()
        .and_then(form_normalizer::parse_lenient_date)
        .ok_or_else(|| IncompleteForm {
            missing: vec![FIELD_END_DATE.to_string()],
        })?;
    let travel_days = form
        .travel_days
        .or_else(|| form_normalizer::calc_days(start, end))
        .ok_or_else(|| IncompleteForm {
            missing: vec![FIELD_TRAVEL_DAYS.to_string()],
        })?;

    Ok(TripRequest {
        city: form.city.unwrap_or_default(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        travel_days,
        transportation: form
            .transportation
            .unwrap_or_else(|| DEFAULT_TRANSPORTATION.to_string()),
        accommodation: form
            .accommodation
            .unwrap_or_else(|| DEFAULT_ACCOMMODATION.to_string()),
        preferences: form.preferences,
        free_text_input: form.free_text_input.unwrap_or_default(),
    })
}
