//! Pipeline statistics for the dashboard header cards.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::deal::DealStage;
use crate::domain::stats::{RangeKey, conversion_rate, pct_change, resolve_windows};
use crate::dto::stats::{DealStats, StatsChanges, StatsResponse};
use crate::forms::stats::{StatsQueryForm, StatsRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DealStatsQuery, StageFilter, StatsReader};
use crate::services::{ServiceResult, ensure_role, hub_of, run_blocking};

const WON: &[DealStage] = &[DealStage::Won];
const CLOSED: &[DealStage] = &[DealStage::Won, DealStage::Lost];
const LOST: &[DealStage] = &[DealStage::Lost];

/// Runs one aggregate on the blocking pool.
async fn blocking<R, T, F>(repo: &Arc<R>, query: DealStatsQuery, f: F) -> ServiceResult<T>
where
    R: StatsReader + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&R, &DealStatsQuery) -> RepositoryResult<T> + Send + 'static,
{
    run_blocking(repo, move |repo| Ok(f(repo, &query)?)).await
}

/// Computes the stats for the local clock.
pub async fn deal_stats<R>(
    repo: Arc<R>,
    user: &AuthenticatedUser,
    form: StatsQueryForm,
) -> ServiceResult<StatsResponse>
where
    R: StatsReader + Send + Sync + 'static,
{
    deal_stats_at(repo, user, form, Local::now()).await
}

/// Computes the stats relative to `now`. All thirteen aggregates run
/// concurrently; the first failure fails the whole request.
pub async fn deal_stats_at<R, Tz>(
    repo: Arc<R>,
    user: &AuthenticatedUser,
    form: StatsQueryForm,
    now: DateTime<Tz>,
) -> ServiceResult<StatsResponse>
where
    R: StatsReader + Send + Sync + 'static,
    Tz: TimeZone,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let hub_id = hub_of(user)?;
    let StatsRequest { range, filters } = StatsRequest::try_from(form)?;

    let windows = resolve_windows(range, &now);
    let current = DealStatsQuery::new(hub_id, windows.current, filters);
    let previous = DealStatsQuery::new(hub_id, windows.previous, filters);

    let (
        total,
        active,
        prospects,
        won,
        contacted,
        proposal,
        negotiation,
        revenue,
        prev_total,
        prev_active,
        prev_prospects,
        prev_won,
        prev_revenue,
    ) = futures::try_join!(
        blocking(&repo, current, |r, q| r.count_deals(q)),
        blocking(&repo, current.stages(StageFilter::NotIn(CLOSED)), |r, q| r.count_deals(q)),
        blocking(&repo, current, |r, q| r.count_prospects(q)),
        blocking(&repo, current.stages(StageFilter::In(WON)), |r, q| r.count_deals(q)),
        blocking(
            &repo,
            current.stages(StageFilter::In(DealStage::CONTACTED_OR_LATER)),
            |r, q| r.count_deals(q)
        ),
        blocking(
            &repo,
            current.stages(StageFilter::In(DealStage::PROPOSAL_OR_LATER)),
            |r, q| r.count_deals(q)
        ),
        blocking(
            &repo,
            current.stages(StageFilter::In(DealStage::NEGOTIATION_OR_LATER)),
            |r, q| r.count_deals(q)
        ),
        blocking(&repo, current.stages(StageFilter::NotIn(LOST)), |r, q| r.sum_deal_amount(q)),
        blocking(&repo, previous, |r, q| r.count_deals(q)),
        blocking(&repo, previous.stages(StageFilter::NotIn(CLOSED)), |r, q| r.count_deals(q)),
        blocking(&repo, previous, |r, q| r.count_prospects(q)),
        blocking(&repo, previous.stages(StageFilter::In(WON)), |r, q| r.count_deals(q)),
        blocking(&repo, previous.stages(StageFilter::NotIn(LOST)), |r, q| r.sum_deal_amount(q)),
    )?;

    let conversion = conversion_rate(won, total);
    let prev_conversion = conversion_rate(prev_won, prev_total);

    Ok(StatsResponse {
        range,
        filters,
        data: DealStats {
            total_deals: total,
            new_deals: prospects,
            active_deals: active,
            won_deals: won,
            contacted_deals: contacted,
            proposal_deals: proposal,
            negotiation_deals: negotiation,
            conversion_rate: conversion,
            expected_revenue_usd: revenue,
            changes: changes(
                range,
                (prev_prospects, prospects),
                (prev_active, active),
                (prev_revenue, revenue),
                (prev_conversion, conversion),
            ),
        },
    })
}

fn changes(
    range: RangeKey,
    new_deals: (i64, i64),
    active_deals: (i64, i64),
    revenue: (f64, f64),
    conversion: (f64, f64),
) -> StatsChanges {
    StatsChanges {
        new_deals_change_percent: pct_change(range, new_deals.0 as f64, new_deals.1 as f64),
        active_deals_change_percent: pct_change(
            range,
            active_deals.0 as f64,
            active_deals.1 as f64,
        ),
        expected_revenue_change_percent: pct_change(range, revenue.0, revenue.1),
        conversion_rate_change_percent: pct_change(range, conversion.0, conversion.1),
    }
}
