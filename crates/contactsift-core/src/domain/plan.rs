/// Country calling code shared by the North American Numbering Plan.
pub const NANP_COUNTRY_CODE: u16 = 1;

/// National significant number lengths for one country calling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingPlan {
    pub country_code: u16,
    pub region: &'static str,
    pub min_len: usize,
    pub max_len: usize,
    pub leading_zero: bool,
}

impl NumberingPlan {
    const fn new(country_code: u16, region: &'static str, min_len: usize, max_len: usize) -> Self {
        Self {
            country_code,
            region,
            min_len,
            max_len,
            leading_zero: false,
        }
    }

    const fn with_leading_zero(mut self) -> Self {
        self.leading_zero = true;
        self
    }

    pub fn accepts(&self, national: &str) -> bool {
        let len = national.len();
        if len < self.min_len || len > self.max_len {
            return false;
        }
        if !national.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        self.leading_zero || !national.starts_with('0')
    }
}

// Calling codes are prefix-free, so at most one entry matches the head of a number.
static PLANS: &[NumberingPlan] = &[
    NumberingPlan::new(1, "NANP", 10, 10),
    NumberingPlan::new(7, "RU", 10, 10),
    NumberingPlan::new(20, "EG", 8, 10),
    NumberingPlan::new(27, "ZA", 9, 9),
    NumberingPlan::new(30, "GR", 10, 10),
    NumberingPlan::new(31, "NL", 9, 9),
    NumberingPlan::new(32, "BE", 8, 9),
    NumberingPlan::new(33, "FR", 9, 9),
    NumberingPlan::new(34, "ES", 9, 9),
    NumberingPlan::new(36, "HU", 8, 9),
    NumberingPlan::new(39, "IT", 6, 11).with_leading_zero(),
    NumberingPlan::new(40, "RO", 9, 9),
    NumberingPlan::new(41, "CH", 9, 9),
    NumberingPlan::new(43, "AT", 4, 13),
    NumberingPlan::new(44, "GB", 9, 10),
    NumberingPlan::new(45, "DK", 8, 8),
    NumberingPlan::new(46, "SE", 7, 10),
    NumberingPlan::new(47, "NO", 8, 8),
    NumberingPlan::new(48, "PL", 9, 9),
    NumberingPlan::new(49, "DE", 6, 13),
    NumberingPlan::new(51, "PE", 8, 9),
    NumberingPlan::new(52, "MX", 10, 10),
    NumberingPlan::new(53, "CU", 8, 8),
    NumberingPlan::new(54, "AR", 10, 11),
    NumberingPlan::new(55, "BR", 10, 11),
    NumberingPlan::new(56, "CL", 9, 9),
    NumberingPlan::new(57, "CO", 10, 10),
    NumberingPlan::new(58, "VE", 10, 10),
    NumberingPlan::new(60, "MY", 8, 10),
    NumberingPlan::new(61, "AU", 9, 9),
    NumberingPlan::new(62, "ID", 8, 12),
    NumberingPlan::new(63, "PH", 10, 10),
    NumberingPlan::new(64, "NZ", 8, 10),
    NumberingPlan::new(65, "SG", 8, 8),
    NumberingPlan::new(66, "TH", 8, 9),
    NumberingPlan::new(81, "JP", 9, 10),
    NumberingPlan::new(82, "KR", 8, 10),
    NumberingPlan::new(84, "VN", 9, 10),
    NumberingPlan::new(86, "CN", 10, 11),
    NumberingPlan::new(90, "TR", 10, 10),
    NumberingPlan::new(91, "IN", 10, 10),
    NumberingPlan::new(92, "PK", 9, 10),
    NumberingPlan::new(93, "AF", 9, 9),
    NumberingPlan::new(94, "LK", 9, 9),
    NumberingPlan::new(95, "MM", 8, 10),
    NumberingPlan::new(98, "IR", 10, 10),
    NumberingPlan::new(212, "MA", 9, 9),
    NumberingPlan::new(213, "DZ", 9, 9),
    NumberingPlan::new(234, "NG", 8, 10),
    NumberingPlan::new(254, "KE", 9, 9),
    NumberingPlan::new(351, "PT", 9, 9),
    NumberingPlan::new(353, "IE", 7, 9),
    NumberingPlan::new(358, "FI", 5, 12),
    NumberingPlan::new(420, "CZ", 9, 9),
    NumberingPlan::new(852, "HK", 8, 8),
    NumberingPlan::new(880, "BD", 10, 10),
    NumberingPlan::new(886, "TW", 8, 9),
    NumberingPlan::new(966, "SA", 9, 9),
    NumberingPlan::new(971, "AE", 8, 9),
    NumberingPlan::new(972, "IL", 8, 9),
];

pub fn plans() -> &'static [NumberingPlan] {
    PLANS
}

pub fn plan_for(country_code: u16) -> Option<&'static NumberingPlan> {
    PLANS.iter().find(|plan| plan.country_code == country_code)
}

/// Splits an international digit string into its plan and national number.
pub fn split_country_code(digits: &str) -> Option<(&'static NumberingPlan, &str)> {
    for width in 1..=3 {
        if digits.len() <= width {
            return None;
        }
        let (head, rest) = digits.split_at(width);
        let Ok(code) = head.parse::<u16>() else {
            return None;
        };
        if let Some(plan) = plan_for(code) {
            return Some((plan, rest));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{plan_for, plans, split_country_code, NANP_COUNTRY_CODE};

    #[test]
    fn calling_codes_are_prefix_free() {
        for a in plans() {
            for b in plans() {
                if a.country_code == b.country_code {
                    continue;
                }
                let a_code = a.country_code.to_string();
                let b_code = b.country_code.to_string();
                assert!(
                    !b_code.starts_with(&a_code),
                    "{a_code} is a prefix of {b_code}"
                );
            }
        }
    }

    #[test]
    fn split_finds_one_two_and_three_digit_codes() {
        let (plan, national) = split_country_code("12125551234").unwrap();
        assert_eq!(plan.country_code, NANP_COUNTRY_CODE);
        assert_eq!(national, "2125551234");

        let (plan, national) = split_country_code("919876543210").unwrap();
        assert_eq!(plan.region, "IN");
        assert_eq!(national, "9876543210");

        let (plan, national) = split_country_code("971501234567").unwrap();
        assert_eq!(plan.region, "AE");
        assert_eq!(national, "501234567");
    }

    #[test]
    fn split_rejects_unknown_codes() {
        assert!(split_country_code("8001234567").is_none());
        assert!(split_country_code("1").is_none());
    }

    #[test]
    fn nanp_requires_ten_digits_without_leading_zero() {
        let nanp = plan_for(NANP_COUNTRY_CODE).unwrap();
        assert!(nanp.accepts("2125551234"));
        assert!(nanp.accepts("1234567890"));
        assert!(!nanp.accepts("0412345678"));
        assert!(!nanp.accepts("5550101"));
    }

    #[test]
    fn italy_allows_leading_zero() {
        let italy = plan_for(39).unwrap();
        assert!(italy.accepts("0612345678"));
    }
}
