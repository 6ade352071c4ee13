//! Rule-based field matchers for receipt/voucher text.
//!
//! Every label family is a [`LineMatcher`] that inspects one normalized line
//! at a time. How matches combine (first line wins, accumulate, bottom-up)
//! is decided by the caller, not by the matcher.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod lines;
pub mod patterns;
pub mod supplier;
pub mod totals;
pub mod voucher_no;

pub use amounts::{parse_amount, round_money};
pub use dates::{parse_date_token, DateFormat, DateMatcher, DATE_FORMATS};
pub use items::{extract_items, ItemScan, LineItemMatcher};
pub use lines::normalize_lines;
pub use supplier::SupplierCodeMatcher;
pub use totals::{resolve_totals, AmountLabelMatcher, CombinePolicy, Totals, TotalsFamily, TOTALS_WINDOW};
pub use voucher_no::VoucherNoMatcher;

/// Trait for single-line field matchers.
pub trait LineMatcher {
    /// The type of value this matcher produces.
    type Output;

    /// Try to match one normalized line.
    fn try_match(&self, line: &str) -> Option<Self::Output>;

    /// First matching line, scanning top to bottom.
    fn find_first(&self, lines: &[&str]) -> Option<ExtractionMatch<Self::Output>>
    where
        Self: Sized,
    {
        lines.iter().enumerate().find_map(|(idx, line)| {
            self.try_match(line)
                .map(|value| ExtractionMatch::new(value, *line).with_line(idx))
        })
    }

    /// Every matching line, top to bottom.
    fn find_all(&self, lines: &[&str]) -> Vec<ExtractionMatch<Self::Output>>
    where
        Self: Sized,
    {
        lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                self.try_match(line)
                    .map(|value| ExtractionMatch::new(value, *line).with_line(idx))
            })
            .collect()
    }
}

/// A matched value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the source line among the normalized lines.
    pub line: Option<usize>,
    /// Source line that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            line: None,
            source: source.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
