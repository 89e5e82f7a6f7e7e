use crate::domain::{PhoneNormalizer, ResultRow, StrategyName};
use crate::error::CoreError;
use crate::recognizer::Recognizer;
use crate::rules::dedup::{dedupe_batch, ImageOutcome, SeenPhones};
use crate::rules::select::select_strategy;
use tracing::{debug, warn};

/// One uploaded file; `content` carries the read failure when the bytes never arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub content: Result<Vec<u8>, String>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content: Ok(bytes),
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: Err(error.into()),
        }
    }
}

/// Runs strategy selection for one upload, turning any failure into an outcome.
pub fn process_upload<R>(
    recognizer: &R,
    upload: Upload,
    strategies: &[StrategyName],
    normalizer: &PhoneNormalizer,
) -> ImageOutcome
where
    R: Recognizer + ?Sized,
{
    let Upload { filename, content } = upload;
    let bytes = match content {
        Ok(bytes) if bytes.is_empty() => {
            let error = CoreError::EmptyUpload(filename.clone()).to_string();
            warn!(file = %filename, %error, "skipping upload");
            return ImageOutcome::Failed { filename, error };
        }
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(file = %filename, %error, "skipping upload");
            return ImageOutcome::Failed { filename, error };
        }
    };

    let selection = select_strategy(recognizer, &bytes, strategies, normalizer);
    debug!(
        file = %filename,
        strategy = selection.strategy_tag(),
        candidates = selection.candidates().len(),
        "image processed"
    );
    ImageOutcome::Selected {
        filename,
        selection,
    }
}

/// Processes uploads strictly in the given order and returns phone-unique rows.
pub fn process_batch<R, I>(
    recognizer: &R,
    uploads: I,
    strategies: &[StrategyName],
    normalizer: &PhoneNormalizer,
) -> Vec<ResultRow>
where
    R: Recognizer + ?Sized,
    I: IntoIterator<Item = Upload>,
{
    let outcomes = uploads
        .into_iter()
        .map(|upload| process_upload(recognizer, upload, strategies, normalizer));
    let (rows, seen) = dedupe_batch(outcomes, SeenPhones::new());
    debug!(rows = rows.len(), unique_phones = seen.len(), "batch complete");
    rows
}
