use crate::domain::{LineRecord, StrategyName};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
    #[error("recognizer failed: {0}")]
    Failed(String),
    #[error("invalid recognizer output: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces line records for one image under one preprocessing strategy.
///
/// Engine start-up and preprocessing belong to the implementation; callers
/// only see line records or an error for that single pass.
pub trait Recognizer {
    fn recognizer_name(&self) -> &str;
    fn recognize(
        &self,
        image: &[u8],
        strategy: &StrategyName,
    ) -> Result<Vec<LineRecord>, RecognizeError>;
}

impl<R: Recognizer + ?Sized> Recognizer for &R {
    fn recognizer_name(&self) -> &str {
        (**self).recognizer_name()
    }

    fn recognize(
        &self,
        image: &[u8],
        strategy: &StrategyName,
    ) -> Result<Vec<LineRecord>, RecognizeError> {
        (**self).recognize(image, strategy)
    }
}
