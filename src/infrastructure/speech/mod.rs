mod bailian_engine;
mod iflytek_engine;
mod transcription_engine_factory;

pub use bailian_engine::{
    BailianEngine, BailianSettings, ContentItem, InputAudio, RequestMessage, ResponseChoice,
    ResponseContent, ResponseContentItem, ResponseMessage, SampleFormat, TranscriptionRequest,
    TranscriptionResponse, transcript_from_response,
};
pub use iflytek_engine::{
    AudioFrame, BusinessSection, CandidateWord, CommonSection, FrameData, IflytekEngine,
    IflytekSettings, RecognitionData, RecognitionMessage, RecognitionResult, WordSegment,
};
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
