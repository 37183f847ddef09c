use serde::Serialize;

use crate::domain::stats::{RangeKey, StatsFilters};

/// Response of `GET /api/admin/deals/stats`.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatsResponse {
    pub range: RangeKey,
    pub filters: StatsFilters,
    pub data: DealStats,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealStats {
    pub total_deals: i64,
    /// Prospects created in the window.
    pub new_deals: i64,
    pub active_deals: i64,
    pub won_deals: i64,
    pub contacted_deals: i64,
    pub proposal_deals: i64,
    pub negotiation_deals: i64,
    pub conversion_rate: f64,
    #[serde(rename = "expectedRevenueUSD")]
    pub expected_revenue_usd: f64,
    pub changes: StatsChanges,
}

/// Percentage changes against the previous window; all zero for `all`.
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsChanges {
    pub new_deals_change_percent: f64,
    pub active_deals_change_percent: f64,
    pub expected_revenue_change_percent: f64,
    pub conversion_rate_change_percent: f64,
}
