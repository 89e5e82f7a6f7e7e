use crate::domain::{ContactRow, ErrorRow, ResultRow};
use crate::rules::select::Selection;
use std::collections::HashSet;

/// Phones already emitted within one batch.
///
/// Owned by a single batch run and handed back afterwards; never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenPhones {
    phones: HashSet<String>,
}

impl SeenPhones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `phone` and reports whether it was new. Empty phones are always new.
    pub fn insert(&mut self, phone: &str) -> bool {
        if phone.is_empty() {
            return true;
        }
        self.phones.insert(phone.to_string())
    }

    pub fn contains(&self, phone: &str) -> bool {
        !phone.is_empty() && self.phones.contains(phone)
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }
}

/// Per-image outcome handed to the deduplicator, in upload order.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    Selected {
        filename: String,
        selection: Selection,
    },
    Failed {
        filename: String,
        error: String,
    },
}

impl ImageOutcome {
    pub fn filename(&self) -> &str {
        match self {
            ImageOutcome::Selected { filename, .. } | ImageOutcome::Failed { filename, .. } => {
                filename
            }
        }
    }
}

/// Appends the rows for one image, skipping phones seen earlier in the batch.
pub fn dedupe_image(outcome: ImageOutcome, seen: &mut SeenPhones, rows: &mut Vec<ResultRow>) {
    match outcome {
        ImageOutcome::Failed { filename, error } => {
            rows.push(ResultRow::Error(ErrorRow { filename, error }));
        }
        ImageOutcome::Selected {
            filename,
            selection: Selection::Empty,
        } => {
            rows.push(ResultRow::Contact(ContactRow::placeholder(filename)));
        }
        ImageOutcome::Selected {
            filename,
            selection,
        } => {
            let strategy = selection.strategy_tag().to_string();
            for candidate in selection.into_candidates() {
                if !seen.insert(&candidate.phone) {
                    continue;
                }
                rows.push(ResultRow::Contact(ContactRow {
                    filename: filename.clone(),
                    name: candidate.name,
                    phone: candidate.phone,
                    confidence: candidate.confidence,
                    strategy: strategy.clone(),
                }));
            }
        }
    }
}

/// Folds a whole batch into phone-unique rows, earliest occurrence first.
pub fn dedupe_batch<I>(outcomes: I, seen: SeenPhones) -> (Vec<ResultRow>, SeenPhones)
where
    I: IntoIterator<Item = ImageOutcome>,
{
    let mut seen = seen;
    let mut rows = Vec::new();
    for outcome in outcomes {
        dedupe_image(outcome, &mut seen, &mut rows);
    }
    (enforce_unique_phones(rows), seen)
}

/// Drops any later row whose non-empty phone repeats an earlier one.
pub fn enforce_unique_phones(rows: Vec<ResultRow>) -> Vec<ResultRow> {
    retain_first_by_key(rows, |row| row.phone().map(str::to_string))
}

/// Keeps the first item per key; items without a key are always kept.
pub fn retain_first_by_key<T, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    F: FnMut(&T) -> Option<String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match key(item) {
            Some(value) => seen.insert(value),
            None => true,
        })
        .collect()
}
