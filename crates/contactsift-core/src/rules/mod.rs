pub mod dataset;
pub mod dedup;
pub mod extract;
pub mod select;
pub mod validity;

pub use dataset::{
    default_phone_keywords, normalize_table, select_phone_column, DEFAULT_PHONE_KEYWORDS,
};
pub use dedup::{
    dedupe_batch, dedupe_image, enforce_unique_phones, retain_first_by_key, ImageOutcome,
    SeenPhones,
};
pub use extract::{extract_candidates, find_phone};
pub use select::{select_strategy, Selection};
pub use validity::is_valid_candidate;
