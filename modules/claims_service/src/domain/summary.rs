//! Per-currency settlement totals

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::contract::model::Settlement;

/// Settlement totals grouped by currency for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementSummary {
    /// Sum of settlement amounts per currency code
    pub totals_by_currency: BTreeMap<String, Decimal>,
    /// Total settlement count across all currencies
    pub count: u64,
}

/// Group a claim's settlements by currency and sum the amounts. Settlements
/// stored without a currency count under `default_currency`.
pub fn summarize(settlements: &[Settlement], default_currency: &str) -> SettlementSummary {
    let mut totals_by_currency: BTreeMap<String, Decimal> = BTreeMap::new();
    for settlement in settlements {
        let currency = settlement
            .currency
            .as_deref()
            .unwrap_or(default_currency)
            .to_string();
        *totals_by_currency.entry(currency).or_insert(Decimal::ZERO) += settlement.amount;
    }
    SettlementSummary {
        totals_by_currency,
        count: settlements.len() as u64,
    }
}
