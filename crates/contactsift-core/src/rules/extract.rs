use crate::domain::{is_plausible_name, ContactCandidate, LineRecord, PhoneNormalizer, UNKNOWN_NAME};
use regex::Regex;
use std::sync::LazyLock;

// Optional 1-3 digit country prefix, then 3-3-4 (NANP style) or 5-5 grouping.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+?[0-9]{1,3}[-.\s]?)?(?:\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}|[0-9]{5}[-.\s]?[0-9]{5})",
    )
    .expect("valid phone pattern")
});

/// First phone-shaped substring of a line, trimmed.
pub fn find_phone(text: &str) -> Option<&str> {
    PHONE_PATTERN
        .find(text)
        .map(|found| found.as_str().trim())
        .filter(|found| !found.is_empty())
}

/// Pairs each phone line with the line directly above it, top to bottom.
pub fn extract_candidates(
    lines: &[LineRecord],
    normalizer: &PhoneNormalizer,
) -> Vec<ContactCandidate> {
    let mut sorted: Vec<&LineRecord> = lines.iter().collect();
    sorted.sort_by(|a, b| a.top().total_cmp(&b.top()));

    let mut candidates = Vec::new();
    for (index, line) in sorted.iter().enumerate() {
        let Some(raw_phone) = find_phone(&line.text) else {
            continue;
        };

        let name = index
            .checked_sub(1)
            .map(|prev| sorted[prev].text.trim())
            .filter(|prev| is_plausible_name(prev))
            .unwrap_or(UNKNOWN_NAME);

        candidates.push(ContactCandidate {
            name: name.to_string(),
            phone: normalizer.normalize(raw_phone),
            confidence: line.confidence,
            raw_phone: raw_phone.to_string(),
            raw_text: line.text.clone(),
        });
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::{extract_candidates, find_phone};
    use crate::domain::{LineRecord, PhoneNormalizer, UNKNOWN_NAME};

    fn line(y: f64, text: &str, confidence: f64) -> LineRecord {
        LineRecord::at(0.0, y, 100.0, 20.0, text, confidence)
    }

    #[test]
    fn find_phone_accepts_common_groupings() {
        assert_eq!(find_phone("Tel: (212) 555-1234"), Some("(212) 555-1234"));
        assert_eq!(find_phone("+1 212.555.1234 (cell)"), Some("+1 212.555.1234"));
        assert_eq!(find_phone("+91 98765 43210"), Some("+91 98765 43210"));
        assert_eq!(find_phone("2125551234"), Some("2125551234"));
    }

    #[test]
    fn find_phone_ignores_short_numbers() {
        assert_eq!(find_phone("Suite 404"), None);
        assert_eq!(find_phone("555-0101"), None);
    }

    #[test]
    fn extract_sorts_by_vertical_position() {
        let lines = vec![
            line(90.0, "415-555-9999", 0.7),
            line(0.0, "Ada Lovelace", 0.9),
            line(30.0, "212-555-1234", 0.8),
            line(60.0, "Grace Hopper", 0.9),
        ];
        let candidates = extract_candidates(&lines, &PhoneNormalizer::default());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Ada Lovelace");
        assert_eq!(candidates[0].phone, "12125551234");
        assert_eq!(candidates[0].confidence, 0.8);
        assert_eq!(candidates[1].name, "Grace Hopper");
        assert_eq!(candidates[1].phone, "14155559999");
    }

    #[test]
    fn extract_keeps_input_order_for_equal_tops() {
        let lines = vec![
            line(10.0, "First Name", 0.9),
            line(10.0, "Second Name", 0.9),
            line(40.0, "212-555-1234", 0.9),
        ];
        let candidates = extract_candidates(&lines, &PhoneNormalizer::default());
        assert_eq!(candidates[0].name, "Second Name");
    }

    #[test]
    fn extract_rejects_names_with_digits_or_too_many_tokens() {
        let lines = vec![
            line(0.0, "Suite 12 Main Street", 0.9),
            line(30.0, "212-555-1234", 0.9),
            line(60.0, "this line has far too many words", 0.9),
            line(90.0, "415-555-9999", 0.9),
        ];
        let candidates = extract_candidates(&lines, &PhoneNormalizer::default());
        assert!(candidates.iter().all(|c| c.name == UNKNOWN_NAME));
    }

    #[test]
    fn extract_uses_previous_line_even_when_it_is_a_phone() {
        let lines = vec![
            line(0.0, "Ada Lovelace", 0.9),
            line(30.0, "212-555-1234", 0.9),
            line(60.0, "415-555-9999", 0.9),
        ];
        let candidates = extract_candidates(&lines, &PhoneNormalizer::default());
        assert_eq!(candidates[1].name, UNKNOWN_NAME);
    }

    #[test]
    fn extract_first_line_has_unknown_name() {
        let lines = vec![line(0.0, "Call 212-555-1234", 0.6)];
        let candidates = extract_candidates(&lines, &PhoneNormalizer::default());
        assert_eq!(candidates[0].name, UNKNOWN_NAME);
        assert_eq!(candidates[0].raw_phone, "212-555-1234");
        assert_eq!(candidates[0].raw_text, "Call 212-555-1234");
    }
}
