use lijiang::application::ports::{AudioDecoder, AudioDecoderError};
use lijiang::infrastructure::audio::WavPcmDecoder;

fn build_wav(sample_rate: u32, channels: u16, bits_per_sample: u16, data: &[u8]) -> Vec<u8> {
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_size = data.len() as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(data);
    wav
}

fn mono_16k_wav(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    build_wav(16_000, 1, 16, &data)
}

#[test]
fn given_mono_16bit_16k_wav_when_decoding_then_samples_are_returned() {
    let samples: Vec<i16> = vec![1, -2, 3, -4, 5, -6];
    let wav = mono_16k_wav(&samples);
    let decoder = WavPcmDecoder::new(16_000);

    let decoded = decoder.decode(&wav).unwrap();

    assert_eq!(decoded.samples, samples);
    assert_eq!(decoded.sample_rate, 16_000);
    assert_eq!(decoded.container, wav);
    assert_eq!(decoded.pcm_bytes().len(), samples.len() * 2);
}

#[test]
fn given_stereo_wav_when_decoding_then_unsupported_format() {
    let wav = build_wav(16_000, 2, 16, &[0u8; 64]);
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&wav);

    assert!(matches!(
        result,
        Err(AudioDecoderError::UnsupportedFormat(_))
    ));
}

#[test]
fn given_8bit_wav_when_decoding_then_unsupported_format() {
    let wav = build_wav(16_000, 1, 8, &[0u8; 64]);
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&wav);

    assert!(matches!(
        result,
        Err(AudioDecoderError::UnsupportedFormat(_))
    ));
}

#[test]
fn given_44100hz_wav_when_decoding_then_unsupported_format() {
    let wav = build_wav(44_100, 1, 16, &[0u8; 64]);
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&wav);

    assert!(matches!(
        result,
        Err(AudioDecoderError::UnsupportedFormat(_))
    ));
}

#[test]
fn given_wav_without_samples_when_decoding_then_empty_audio() {
    let wav = build_wav(16_000, 1, 16, &[]);
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&wav);

    assert!(matches!(result, Err(AudioDecoderError::EmptyAudio)));
}

#[test]
fn given_garbage_bytes_when_decoding_then_malformed_container() {
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&[0xFFu8; 128]);

    assert!(matches!(
        result,
        Err(AudioDecoderError::MalformedContainer(_))
    ));
}

#[test]
fn given_empty_bytes_when_decoding_then_malformed_container() {
    let decoder = WavPcmDecoder::new(16_000);

    let result = decoder.decode(&[]);

    assert!(matches!(
        result,
        Err(AudioDecoderError::MalformedContainer(_))
    ));
}
