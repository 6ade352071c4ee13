//! Totals and deductions resolved from the bottom of the voucher.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::parse_amount;
use super::patterns::{DEDUCTION, GROSS_TOTAL, NET_TOTAL};
use super::LineMatcher;

/// Number of trailing lines searched for totals.
pub const TOTALS_WINDOW: usize = 12;

/// Label families searched in the totals window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsFamily {
    /// Grand total, total amount, net total, net amount.
    Net,
    /// Gross total or a bare "Total".
    Gross,
    /// Commission, damages, unloading, L/F & cash.
    Deduction,
}

/// How matches of one family combine across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinePolicy {
    /// The first match in scan order is kept.
    FirstWins,
    /// Every match is summed.
    Accumulate,
}

impl TotalsFamily {
    pub fn policy(&self) -> CombinePolicy {
        match self {
            TotalsFamily::Net | TotalsFamily::Gross => CombinePolicy::FirstWins,
            TotalsFamily::Deduction => CombinePolicy::Accumulate,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            TotalsFamily::Net => &*NET_TOTAL,
            TotalsFamily::Gross => &*GROSS_TOTAL,
            TotalsFamily::Deduction => &*DEDUCTION,
        }
    }
}

/// Matches a label of one family followed by an amount.
#[derive(Debug, Clone, Copy)]
pub struct AmountLabelMatcher {
    family: TotalsFamily,
}

impl AmountLabelMatcher {
    pub const fn new(family: TotalsFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> TotalsFamily {
        self.family
    }
}

impl LineMatcher for AmountLabelMatcher {
    type Output = Decimal;

    fn try_match(&self, line: &str) -> Option<Decimal> {
        let caps = self.family.pattern().captures(line)?;
        parse_amount(&caps[1])
    }
}

/// Families tested on every line of the window, in this order.
const TOTALS_MATCHERS: [AmountLabelMatcher; 3] = [
    AmountLabelMatcher::new(TotalsFamily::Net),
    AmountLabelMatcher::new(TotalsFamily::Gross),
    AmountLabelMatcher::new(TotalsFamily::Deduction),
];

/// Totals as printed on the voucher, before any derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub gross_total: Option<Decimal>,
    pub net_total: Option<Decimal>,
    pub total_deductions: Option<Decimal>,
}

impl Totals {
    fn slot(&mut self, family: TotalsFamily) -> &mut Option<Decimal> {
        match family {
            TotalsFamily::Net => &mut self.net_total,
            TotalsFamily::Gross => &mut self.gross_total,
            TotalsFamily::Deduction => &mut self.total_deductions,
        }
    }

    fn record(&mut self, family: TotalsFamily, amount: Decimal) {
        let slot = self.slot(family);
        match (*slot, family.policy()) {
            (None, _) => *slot = Some(amount),
            (Some(sum), CombinePolicy::Accumulate) => match sum.checked_add(amount) {
                Some(total) => *slot = Some(total),
                None => debug!("Skipping {:?} amount {}: total overflows", family, amount),
            },
            (Some(_), CombinePolicy::FirstWins) => {}
        }
    }
}

/// Scan the last [`TOTALS_WINDOW`] lines bottom-up for totals and deductions.
///
/// Net and gross keep the match closest to the bottom; every deduction line
/// adds to `total_deductions`. A single line may feed several families.
pub fn resolve_totals(lines: &[&str]) -> Totals {
    let mut totals = Totals::default();
    let window_start = lines.len().saturating_sub(TOTALS_WINDOW);

    for line in lines[window_start..].iter().rev() {
        for matcher in &TOTALS_MATCHERS {
            if let Some(amount) = matcher.try_match(line) {
                debug!("{:?} amount {} from {:?}", matcher.family(), amount, line);
                totals.record(matcher.family(), amount);
            }
        }
    }

    totals
}
