use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        company::{Company, CompanyUpdate, NewCompany},
        types::{CompanyId, HubId},
    },
    models::company::{
        Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
    },
    repository::{
        CompanyListQuery, CompanyReader, CompanyWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_company = companies::table
            .filter(companies::id.eq(id.get()))
            .filter(companies::hub_id.eq(hub_id.get()))
            .first::<DbCompany>(&mut conn)
            .optional()?;

        db_company
            .map(Company::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<Vec<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;

        let mut items = companies::table
            .filter(companies::hub_id.eq(query.hub_id.get()))
            .into_boxed();

        if let Some(owner_id) = query.owner_id {
            items = items.filter(companies::owner_id.eq(owner_id.get()));
        }
        if let Some(ids) = &query.ids {
            let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
            items = items.filter(companies::id.eq_any(ids));
        }

        items
            .order(companies::created_at.desc())
            .then_order_by(companies::id.desc())
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(|db_company| Company::try_from(db_company).map_err(RepositoryError::from))
            .collect()
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_new_company = DbNewCompany::from_domain(new_company, Utc::now().naive_utc());

        let db_company = diesel::insert_into(companies::table)
            .values(&db_new_company)
            .get_result::<DbCompany>(&mut conn)?;

        Company::try_from(db_company).map_err(RepositoryError::from)
    }

    fn update_company(
        &self,
        id: CompanyId,
        hub_id: HubId,
        updates: &CompanyUpdate,
    ) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let changeset = DbUpdateCompany::from_domain(updates, Utc::now().naive_utc());

        let db_company = diesel::update(
            companies::table
                .filter(companies::id.eq(id.get()))
                .filter(companies::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbCompany>(&mut conn)?;

        Company::try_from(db_company).map_err(RepositoryError::from)
    }

    fn delete_company(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            companies::table
                .filter(companies::id.eq(id.get()))
                .filter(companies::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
