mod health;
mod voice;

pub use health::health_handler;
pub use voice::{plan_by_voice_handler, transcribe_voice_handler};
