mod audio_decoder;
mod llm_client;
mod transcription_engine;
mod trip_planner;

pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodedAudio};
pub use llm_client::{ChatMessage, LlmClient, LlmClientError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use trip_planner::{TripPlanner, TripPlannerError};
