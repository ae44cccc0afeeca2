mod field_extractor;
pub mod form_normalizer;
pub mod request_assembler;
mod voice_planning_service;

pub use field_extractor::{FieldExtractor, extract_json_object};
pub use request_assembler::IncompleteForm;
pub use voice_planning_service::{VoicePlanOutcome, VoicePlanningError, VoicePlanningService};
