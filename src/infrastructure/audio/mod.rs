mod wav_decoder;

pub use wav_decoder::WavPcmDecoder;
