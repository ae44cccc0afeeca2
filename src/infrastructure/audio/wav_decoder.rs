use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::application::ports::{AudioDecoder, AudioDecoderError, DecodedAudio};

/// Validates uploaded WAV payloads against the shape the recognition
/// services ingest: mono, 16-bit integer PCM, at the configured sample rate.
pub struct WavPcmDecoder {
    expected_sample_rate: u32,
}

impl WavPcmDecoder {
    pub fn new(expected_sample_rate: u32) -> Self {
        Self {
            expected_sample_rate,
        }
    }
}

impl AudioDecoder for WavPcmDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedAudio, AudioDecoderError> {
        let mut reader = WavReader::new(Cursor::new(data))
            .map_err(|e| AudioDecoderError::MalformedContainer(format!("wav header: {}", e)))?;

        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(AudioDecoderError::UnsupportedFormat(format!(
                "expected mono audio, got {} channels",
                spec.channels
            )));
        }
        if spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
            return Err(AudioDecoderError::UnsupportedFormat(format!(
                "expected 16-bit integer PCM, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        if spec.sample_rate != self.expected_sample_rate {
            return Err(AudioDecoderError::UnsupportedFormat(format!(
                "expected {} Hz sample rate, got {}",
                self.expected_sample_rate, spec.sample_rate
            )));
        }

        let samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<Result<_, _>>()
            .map_err(|e| AudioDecoderError::MalformedContainer(format!("sample data: {}", e)))?;
        if samples.is_empty() {
            return Err(AudioDecoderError::EmptyAudio);
        }

        tracing::debug!(
            samples = samples.len(),
            sample_rate = spec.sample_rate,
            "WAV payload validated"
        );

        Ok(DecodedAudio {
            samples,
            sample_rate: spec.sample_rate,
            container: data.to_vec(),
        })
    }
}
