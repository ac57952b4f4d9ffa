//! Dual-horizon momentum ranking.
//!
//! Ranks are positions (1-based) in a total order, so no two stocks share a
//! rank. Ties on a return are broken by the other return and then by ticker.
//! `final_rank = rank_6m + rank_12m`, lower is better.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::screening::RankedStock;

pub struct Ranker;

impl Ranker {
    /// Rank the stocks that passed every gate and return them in final order.
    ///
    /// Stocks with `overall_pass == false` are dropped; the input order has
    /// no influence on the result.
    pub fn rank(stocks: Vec<RankedStock>) -> Vec<RankedStock> {
        let mut passed: Vec<RankedStock> = stocks
            .into_iter()
            .filter(|stock| stock.gates.overall_pass)
            .map(|mut stock| {
                stock.rank_6m = None;
                stock.rank_12m = None;
                stock.final_rank = None;
                stock
            })
            .collect();

        if passed.is_empty() {
            return passed;
        }

        passed.sort_by(Self::by_6m);
        for (position, stock) in passed.iter_mut().enumerate() {
            stock.rank_6m = Some(position as u32 + 1);
        }

        passed.sort_by(Self::by_12m);
        for (position, stock) in passed.iter_mut().enumerate() {
            stock.rank_12m = Some(position as u32 + 1);
        }

        for stock in passed.iter_mut() {
            stock.final_rank = match (stock.rank_6m, stock.rank_12m) {
                (Some(r6), Some(r12)) => Some(r6 + r12),
                _ => None,
            };
        }

        passed.sort_by(Self::by_final_rank);

        debug!(ranked = passed.len(), "ranking complete");
        passed
    }

    fn by_6m(a: &RankedStock, b: &RankedStock) -> Ordering {
        descending(a.indicators.return_6m, b.indicators.return_6m)
            .then_with(|| Self::by_returns(a, b))
    }

    fn by_12m(a: &RankedStock, b: &RankedStock) -> Ordering {
        Self::by_returns(a, b)
    }

    fn by_final_rank(a: &RankedStock, b: &RankedStock) -> Ordering {
        a.final_rank
            .cmp(&b.final_rank)
            .then_with(|| Self::by_returns(a, b))
    }

    /// Higher 12-month return, then higher 6-month return, then ticker.
    fn by_returns(a: &RankedStock, b: &RankedStock) -> Ordering {
        descending(
            a.indicators.selected_return_12m(),
            b.indicators.selected_return_12m(),
        )
        .then_with(|| descending(a.indicators.return_6m, b.indicators.return_6m))
        .then_with(|| a.ticker.cmp(&b.ticker))
    }
}

/// Higher values first; missing values sort last. `-0.0` equals `0.0`.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => (y + 0.0).total_cmp(&(x + 0.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
