use diesel::prelude::*;

use crate::{
    domain::{
        prospect::{NewProspect, Prospect},
        types::HubId,
    },
    models::prospect::{NewProspect as DbNewProspect, Prospect as DbProspect},
    repository::{
        DieselRepository, ProspectReader, ProspectWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ProspectReader for DieselRepository {
    fn list_prospects(&self, hub_id: HubId) -> RepositoryResult<Vec<Prospect>> {
        use crate::schema::prospects;

        let mut conn = self.conn()?;
        prospects::table
            .filter(prospects::hub_id.eq(hub_id.get()))
            .order(prospects::created_at.desc())
            .load::<DbProspect>(&mut conn)?
            .into_iter()
            .map(|db_prospect| Prospect::try_from(db_prospect).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProspectWriter for DieselRepository {
    fn create_prospect(&self, new_prospect: &NewProspect) -> RepositoryResult<Prospect> {
        use crate::schema::prospects;

        let mut conn = self.conn()?;
        let db_new_prospect: DbNewProspect = new_prospect.into();

        let db_prospect = diesel::insert_into(prospects::table)
            .values(&db_new_prospect)
            .get_result::<DbProspect>(&mut conn)?;

        Prospect::try_from(db_prospect).map_err(RepositoryError::from)
    }
}
