use crate::domain::{ContactCandidate, PhoneNormalizer, StrategyName, ALL_FAILED_STRATEGY};
use crate::recognizer::Recognizer;
use crate::rules::extract::extract_candidates;
use crate::rules::validity::is_valid_candidate;
use tracing::{debug, warn};

/// Candidate list chosen for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// First strategy with at least one valid candidate.
    Valid {
        strategy: StrategyName,
        candidates: Vec<ContactCandidate>,
    },
    /// First strategy with any candidate, when none was valid.
    Fallback {
        strategy: StrategyName,
        candidates: Vec<ContactCandidate>,
    },
    Empty,
}

impl Selection {
    pub fn strategy_tag(&self) -> &str {
        match self {
            Selection::Valid { strategy, .. } | Selection::Fallback { strategy, .. } => {
                strategy.as_str()
            }
            Selection::Empty => ALL_FAILED_STRATEGY,
        }
    }

    pub fn candidates(&self) -> &[ContactCandidate] {
        match self {
            Selection::Valid { candidates, .. } | Selection::Fallback { candidates, .. } => {
                candidates
            }
            Selection::Empty => &[],
        }
    }

    pub fn into_candidates(self) -> Vec<ContactCandidate> {
        match self {
            Selection::Valid { candidates, .. } | Selection::Fallback { candidates, .. } => {
                candidates
            }
            Selection::Empty => Vec::new(),
        }
    }
}

/// Runs strategies in priority order until one yields a valid candidate.
///
/// A failing recognizer pass counts as zero lines for that strategy only.
pub fn select_strategy<R>(
    recognizer: &R,
    image: &[u8],
    strategies: &[StrategyName],
    normalizer: &PhoneNormalizer,
) -> Selection
where
    R: Recognizer + ?Sized,
{
    let mut fallback: Option<(StrategyName, Vec<ContactCandidate>)> = None;

    for strategy in strategies {
        let lines = match recognizer.recognize(image, strategy) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(
                    recognizer = recognizer.recognizer_name(),
                    strategy = %strategy,
                    error = %err,
                    "recognizer pass failed"
                );
                Vec::new()
            }
        };

        let candidates = extract_candidates(&lines, normalizer);
        debug!(
            strategy = %strategy,
            lines = lines.len(),
            candidates = candidates.len(),
            "strategy attempted"
        );

        if candidates.iter().any(is_valid_candidate) {
            return Selection::Valid {
                strategy: strategy.clone(),
                candidates,
            };
        }

        if fallback.is_none() && !candidates.is_empty() {
            fallback = Some((strategy.clone(), candidates));
        }
    }

    match fallback {
        Some((strategy, candidates)) => Selection::Fallback {
            strategy,
            candidates,
        },
        None => Selection::Empty,
    }
}
