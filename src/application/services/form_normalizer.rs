use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::domain::{
    FIELD_CITY, FIELD_END_DATE, FIELD_START_DATE, FIELD_TRAVEL_DAYS, VoiceFormSuggestion,
};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Build a form suggestion from the raw field mapping returned by extraction.
///
/// Every field is coerced individually; a value of the wrong shape becomes
/// absent rather than an error.
pub fn normalize(raw: &Map<String, Value>) -> VoiceFormSuggestion {
    let mut form = VoiceFormSuggestion {
        city: coerce_text(raw.get("city")),
        start_date: coerce_text(raw.get("start_date")),
        end_date: coerce_text(raw.get("end_date")),
        travel_days: coerce_days(raw.get("travel_days")),
        transportation: coerce_text(raw.get("transportation")),
        accommodation: coerce_text(raw.get("accommodation")),
        preferences: coerce_preferences(raw.get("preferences")),
        free_text_input: coerce_text(raw.get("free_text_input")),
    };
    renormalize(&mut form);
    form
}

/// Canonicalize dates, fill derivable duration fields, and clean preferences.
///
/// Reapplying to an already-normalized form changes nothing; present fields
/// are never rewritten, inference only fills gaps.
pub fn renormalize(form: &mut VoiceFormSuggestion) {
    form.start_date = form
        .start_date
        .take()
        .and_then(|v| parse_lenient_date(&v))
        .map(|d| d.to_string());
    form.end_date = form
        .end_date
        .take()
        .and_then(|v| parse_lenient_date(&v))
        .map(|d| d.to_string());
    if form.travel_days == Some(0) {
        form.travel_days = None;
    }
    infer_duration(form);
    form.preferences = normalize_preferences(&form.preferences);
}

/// Ordered fallback chain: an end date from `start + (days - 1)`, then a day
/// count from the date pair. Each step runs only when its field is absent.
pub fn infer_duration(form: &mut VoiceFormSuggestion) {
    if form.end_date.is_none() {
        if let (Some(start), Some(days)) = (
            form.start_date.as_deref().and_then(parse_lenient_date),
            form.travel_days,
        ) {
            if days >= 1 {
                form.end_date = Some((start + Duration::days(i64::from(days) - 1)).to_string());
            }
        }
    }
    if form.travel_days.is_none() {
        if let (Some(start), Some(end)) = (
            form.start_date.as_deref().and_then(parse_lenient_date),
            form.end_date.as_deref().and_then(parse_lenient_date),
        ) {
            form.travel_days = calc_days(start, end);
        }
    }
}

/// Inclusive day count of a date span; an inverted span is invalid.
pub fn calc_days(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    let delta = (end - start).num_days();
    if delta < 0 {
        None
    } else {
        Some(delta as u32 + 1)
    }
}

/// Tolerant date parsing over a fixed format set. Failure yields `None`
/// instead of an error so one bad date never sinks the whole form.
pub fn parse_lenient_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Trim entries, drop empties and duplicates, keep first-seen order.
pub fn normalize_preferences(preferences: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for item in preferences {
        let token = item.trim();
        if token.is_empty() || cleaned.iter().any(|seen| seen == token) {
            continue;
        }
        cleaned.push(token.to_string());
    }
    cleaned
}

/// Which required fields are still absent.
///
/// A valid day count substitutes for an explicit end date, and when
/// `require_travel_days` is set, a full date pair substitutes for an explicit
/// day count.
pub fn missing_fields(form: &VoiceFormSuggestion, require_travel_days: bool) -> Vec<String> {
    let mut missing = Vec::new();
    let has_days = form.travel_days.is_some_and(|days| days >= 1);
    if form.city.is_none() {
        missing.push(FIELD_CITY.to_string());
    }
    if form.start_date.is_none() {
        missing.push(FIELD_START_DATE.to_string());
    }
    if form.end_date.is_none() && !has_days {
        missing.push(FIELD_END_DATE.to_string());
    }
    if require_travel_days {
        let has_dates = form.start_date.is_some() && form.end_date.is_some();
        if !has_days && !has_dates {
            missing.push(FIELD_TRAVEL_DAYS.to_string());
        }
    }
    missing
}

fn coerce_text(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn coerce_days(value: Option<&Value>) -> Option<u32> {
    let days = match value? {
        Value::Number(number) => number.as_i64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    if days >= 1 {
        u32::try_from(days).ok()
    } else {
        None
    }
}

fn coerce_preferences(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(tag)) => vec![tag.clone()],
        _ => Vec::new(),
    }
}
