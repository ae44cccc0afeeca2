/// Validated audio extracted from an uploaded container.
///
/// Keeps the original container bytes alongside the samples because the
/// transcription bindings differ in which representation they send over the
/// wire.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub container: Vec<u8>,
}

impl DecodedAudio {
    /// Samples as little-endian 16-bit PCM bytes.
    pub fn pcm_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

pub trait AudioDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<DecodedAudio, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed audio container: {0}")]
    MalformedContainer(String),
    #[error("audio payload contains no samples")]
    EmptyAudio,
}
