//! Aggregate queries feeding the pipeline statistics.

use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    repository::{
        DealStatsQuery, DieselRepository, StageFilter, StatsReader, errors::RepositoryResult,
    },
    schema::{deals, prospects},
};

fn stage_names(stages: &[crate::domain::deal::DealStage]) -> Vec<&'static str> {
    stages.iter().map(|stage| stage.as_str()).collect()
}

fn filtered_deals(query: &DealStatsQuery) -> deals::BoxedQuery<'static, Sqlite> {
    let mut items = deals::table
        .filter(deals::hub_id.eq(query.hub_id.get()))
        .into_boxed();

    if let Some(window) = query.window {
        let (start, end) = window.naive_bounds();
        items = items
            .filter(deals::created_at.ge(start))
            .filter(deals::created_at.lt(end));
    }
    if let Some(owner_id) = query.filters.owner_id {
        items = items.filter(deals::owner_id.eq(owner_id.get()));
    }
    if let Some(company_id) = query.filters.company_id {
        items = items.filter(deals::company_id.eq(company_id.get()));
    }
    if let Some(contact_id) = query.filters.contact_id {
        items = items.filter(deals::contact_id.eq(contact_id.get()));
    }

    match query.stages {
        StageFilter::Any => items,
        StageFilter::In(stages) => items.filter(deals::stage.eq_any(stage_names(stages))),
        StageFilter::NotIn(stages) => items.filter(deals::stage.ne_all(stage_names(stages))),
    }
}

fn filtered_prospects(query: &DealStatsQuery) -> prospects::BoxedQuery<'static, Sqlite> {
    let mut items = prospects::table
        .filter(prospects::hub_id.eq(query.hub_id.get()))
        .into_boxed();

    if let Some(window) = query.window {
        let (start, end) = window.naive_bounds();
        items = items
            .filter(prospects::created_at.ge(start))
            .filter(prospects::created_at.lt(end));
    }
    if let Some(owner_id) = query.filters.owner_id {
        items = items.filter(prospects::owner_id.eq(owner_id.get()));
    }
    if let Some(company_id) = query.filters.company_id {
        items = items.filter(prospects::company_id.eq(company_id.get()));
    }
    if let Some(contact_id) = query.filters.contact_id {
        items = items.filter(prospects::contact_id.eq(contact_id.get()));
    }
    items
}

impl StatsReader for DieselRepository {
    fn count_deals(&self, query: &DealStatsQuery) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        let total = filtered_deals(query).count().get_result::<i64>(&mut conn)?;
        Ok(total)
    }

    fn count_prospects(&self, query: &DealStatsQuery) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        let total = filtered_prospects(query)
            .count()
            .get_result::<i64>(&mut conn)?;
        Ok(total)
    }

    fn sum_deal_amount(&self, query: &DealStatsQuery) -> RepositoryResult<f64> {
        let mut conn = self.conn()?;
        let total = filtered_deals(query)
            .select(sum(deals::amount))
            .first::<Option<f64>>(&mut conn)?;
        Ok(total.unwrap_or(0.0))
    }
}
