//! Voucher number extraction.

use super::patterns::VOUCHER_NO;
use super::LineMatcher;

/// Matches a labeled voucher number such as `Voucher No: 4521` or `Vou# 77`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoucherNoMatcher;

impl LineMatcher for VoucherNoMatcher {
    type Output = String;

    fn try_match(&self, line: &str) -> Option<String> {
        VOUCHER_NO
            .captures(line)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_voucher_numbers() {
        let m = VoucherNoMatcher;
        assert_eq!(m.try_match("Voucher No: 4521").as_deref(), Some("4521"));
        assert_eq!(m.try_match("VOUCHER NUMBER 9").as_deref(), Some("9"));
        assert_eq!(m.try_match("Vouch No. - 310").as_deref(), Some("310"));
        assert_eq!(m.try_match("Vou#77").as_deref(), Some("77"));
        assert_eq!(m.try_match("V 12").as_deref(), Some("12"));
    }

    #[test]
    fn test_digit_run_is_capped_at_eight() {
        assert_eq!(
            VoucherNoMatcher.try_match("Voucher No: 123456789").as_deref(),
            Some("12345678")
        );
    }

    #[test]
    fn test_unlabeled_digits_do_not_match() {
        assert_eq!(VoucherNoMatcher.try_match("4521"), None);
        assert_eq!(VoucherNoMatcher.try_match("12/05/2023"), None);
        assert_eq!(VoucherNoMatcher.try_match("Voucher"), None);
    }

    #[test]
    fn test_first_line_wins() {
        let lines = ["Vou No 1", "Voucher No 2"];
        assert_eq!(VoucherNoMatcher.find_first(&lines).unwrap().value, "1");
    }
}
