use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::bailian_engine::{BailianEngine, BailianSettings};
use super::iflytek_engine::{IflytekEngine, IflytekSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    Iflytek,
    Bailian,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        iflytek: IflytekSettings,
        bailian: BailianSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::Iflytek => {
                let engine = IflytekEngine::new(iflytek)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Bailian => {
                let engine = BailianEngine::new(bailian)?;
                Ok(Arc::new(engine))
            }
        }
    }
}
