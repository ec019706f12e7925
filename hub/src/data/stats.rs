use serde::Serialize;

use crate::data::loader::{PositionRecord, PositionTable, PositionType};
use crate::error::LoadError;

/// Aggregate counts and sums over the positions history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_records: u64,
    pub long_count: u64,
    pub short_count: u64,
    pub total_profit: i64,
    pub zero_profit_count: u64,
    pub negative_profit_count: u64,
    pub positive_profit_sum: i64,
    pub winning_trades_count: u64,
}

/// Single pass over the records. Sums are rounded half-to-even.
pub fn compute_stats(records: &[PositionRecord]) -> HistoryStats {
    let mut stats = HistoryStats::default();
    let mut profit_sum = 0.0_f64;
    let mut positive_sum = 0.0_f64;

    for rec in records {
        stats.total_records += 1;
        match rec.position_type {
            Some(PositionType::Long) => stats.long_count += 1,
            Some(PositionType::Short) => stats.short_count += 1,
            _ => {}
        }

        profit_sum += rec.profit;
        if rec.profit > 0.0 {
            stats.winning_trades_count += 1;
            positive_sum += rec.profit;
        } else if rec.profit < 0.0 {
            stats.negative_profit_count += 1;
        } else {
            stats.zero_profit_count += 1;
        }
    }

    stats.total_profit = round_half_even(profit_sum);
    stats.positive_profit_sum = round_half_even(positive_sum);
    stats
}

/// Missing or empty history yields all-zero stats; other failures propagate.
pub fn stats_or_default(result: Result<PositionTable, LoadError>) -> Result<HistoryStats, LoadError> {
    match result {
        Ok(table) => Ok(compute_stats(&table.records)),
        Err(LoadError::NotFound) | Err(LoadError::Empty) => Ok(HistoryStats::default()),
        Err(e) => Err(e),
    }
}

fn round_half_even(v: f64) -> i64 {
    v.round_ties_even() as i64
}
