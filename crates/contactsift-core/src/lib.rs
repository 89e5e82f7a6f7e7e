pub mod domain;
pub mod error;
pub mod pipeline;
pub mod recognizer;
pub mod rules;

pub use domain::*;
pub use error::{CoreError, Result};
pub use pipeline::{process_batch, process_upload, Upload};
pub use recognizer::{RecognizeError, Recognizer};
pub use rules::*;
