use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        deal::{Deal, DealUpdate, NewDeal},
        types::{DealId, HubId},
    },
    models::deal::{Deal as DbDeal, NewDeal as DbNewDeal, UpdateDeal as DbUpdateDeal},
    repository::{
        DealListQuery, DealReader, DealWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl DealReader for DieselRepository {
    fn get_deal_by_id(&self, id: DealId, hub_id: HubId) -> RepositoryResult<Option<Deal>> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let db_deal = deals::table
            .filter(deals::id.eq(id.get()))
            .filter(deals::hub_id.eq(hub_id.get()))
            .first::<DbDeal>(&mut conn)
            .optional()?;

        db_deal
            .map(Deal::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let mut items = deals::table
            .filter(deals::hub_id.eq(query.hub_id.get()))
            .into_boxed();

        if let Some(owner_id) = query.filters.owner_id {
            items = items.filter(deals::owner_id.eq(owner_id.get()));
        }
        if let Some(company_id) = query.filters.company_id {
            items = items.filter(deals::company_id.eq(company_id.get()));
        }
        if let Some(contact_id) = query.filters.contact_id {
            items = items.filter(deals::contact_id.eq(contact_id.get()));
        }
        if let Some(stage) = query.stage {
            items = items.filter(deals::stage.eq(stage.as_str()));
        }

        items
            .order(deals::created_at.desc())
            .then_order_by(deals::id.desc())
            .load::<DbDeal>(&mut conn)?
            .into_iter()
            .map(|db_deal| Deal::try_from(db_deal).map_err(RepositoryError::from))
            .collect()
    }
}

impl DealWriter for DieselRepository {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let db_new_deal: DbNewDeal = new_deal.into();

        let db_deal = diesel::insert_into(deals::table)
            .values(&db_new_deal)
            .get_result::<DbDeal>(&mut conn)?;

        Deal::try_from(db_deal).map_err(RepositoryError::from)
    }

    fn update_deal(
        &self,
        id: DealId,
        hub_id: HubId,
        updates: &DealUpdate,
    ) -> RepositoryResult<Deal> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let changeset = DbUpdateDeal::from_domain(updates, Utc::now().naive_utc());

        let db_deal = diesel::update(
            deals::table
                .filter(deals::id.eq(id.get()))
                .filter(deals::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbDeal>(&mut conn)?;

        Deal::try_from(db_deal).map_err(RepositoryError::from)
    }

    fn delete_deal(&self, id: DealId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            deals::table
                .filter(deals::id.eq(id.get()))
                .filter(deals::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
