use crate::domain::plan::{plan_for, split_country_code, NANP_COUNTRY_CODE};
use serde::{Deserialize, Serialize};

/// What happens to the NANP country code when the input had no `+`/`00` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NanpTrunkPolicy {
    /// `212-555-1234` becomes `12125551234`.
    #[default]
    Retain,
    /// `212-555-1234` becomes `2125551234`; `+1 212 555 1234` keeps the `1`.
    StripImplicit,
}

impl NanpTrunkPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            NanpTrunkPolicy::Retain => "retain",
            NanpTrunkPolicy::StripImplicit => "strip-implicit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "retain" => Some(NanpTrunkPolicy::Retain),
            "strip-implicit" => Some(NanpTrunkPolicy::StripImplicit),
            _ => None,
        }
    }
}

/// Turns free-form phone text into the digit string used as a dedup key.
///
/// Numbers that validate against a known numbering plan come out as country
/// code plus national number. Anything else degrades to the bare digits of the
/// input, so malformed numbers are kept rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhoneNormalizer {
    policy: NanpTrunkPolicy,
}

impl PhoneNormalizer {
    pub const fn new(policy: NanpTrunkPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> NanpTrunkPolicy {
        self.policy
    }

    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        match parse_number(trimmed) {
            Some(parsed) => self.canonical(parsed),
            None => digits_only(trimmed),
        }
    }

    pub fn normalize_optional(&self, raw: Option<&str>) -> String {
        raw.map(|value| self.normalize(value)).unwrap_or_default()
    }

    fn canonical(&self, parsed: ParsedNumber) -> String {
        if parsed.country_code == NANP_COUNTRY_CODE
            && !parsed.explicit
            && self.policy == NanpTrunkPolicy::StripImplicit
        {
            return parsed.national;
        }
        format!("{}{}", parsed.country_code, parsed.national)
    }
}

/// Normalizes with the default [`NanpTrunkPolicy`].
pub fn normalize_phone(raw: &str) -> String {
    PhoneNormalizer::default().normalize(raw)
}

struct ParsedNumber {
    country_code: u16,
    national: String,
    explicit: bool,
}

fn parse_number(trimmed: &str) -> Option<ParsedNumber> {
    // Leading labels such as "Tel:" are not part of the number.
    let start = trimmed.find(|ch: char| ch.is_ascii_digit() || ch == '+')?;
    let number = &trimmed[start..];
    let (explicit, body) = if let Some(rest) = number.strip_prefix('+') {
        (true, rest)
    } else if let Some(rest) = number.strip_prefix("00") {
        (true, rest)
    } else {
        (false, number)
    };

    let body = strip_extension(body);
    let mut digits = String::with_capacity(body.len());
    for ch in body.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !is_separator(ch) {
            return None;
        }
    }
    if digits.len() < 2 {
        return None;
    }

    if explicit {
        let (plan, national) = split_country_code(&digits)?;
        if !plan.accepts(national) {
            return None;
        }
        return Some(ParsedNumber {
            country_code: plan.country_code,
            national: national.to_string(),
            explicit,
        });
    }

    let nanp = plan_for(NANP_COUNTRY_CODE)?;
    let national = match digits.strip_prefix('1') {
        Some(rest) if digits.len() == nanp.max_len + 1 => rest,
        _ => digits.as_str(),
    };
    if !nanp.accepts(national) {
        return None;
    }
    Some(ParsedNumber {
        country_code: NANP_COUNTRY_CODE,
        national: national.to_string(),
        explicit,
    })
}

fn strip_extension(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    let marker = lower.find(['x', '#', ';', ',']);
    let ext = lower.find("ext");
    let cut = match (marker, ext) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match cut {
        Some(index) => &value[..index],
        None => value,
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(ch, '-' | '.' | '(' | ')' | '/' | '\u{2010}'..='\u{2015}' | '\u{2212}')
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}
