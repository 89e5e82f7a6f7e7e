use crate::domain::{is_plausible_name, ContactCandidate};

/// A candidate trusted enough to stop trying further strategies.
pub fn is_valid_candidate(candidate: &ContactCandidate) -> bool {
    candidate.has_known_name() && is_plausible_name(&candidate.name) && !candidate.phone.is_empty()
}
