use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        contact::{Contact, NewContact},
        types::{CompanyId, HubId},
    },
    models::contact::{Contact as DbContact, NewContact as DbNewContact},
    repository::{
        ContactReader, ContactWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ContactReader for DieselRepository {
    fn list_contacts(
        &self,
        hub_id: HubId,
        company_id: Option<CompanyId>,
    ) -> RepositoryResult<Vec<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let mut items = contacts::table
            .filter(contacts::hub_id.eq(hub_id.get()))
            .into_boxed();
        if let Some(company_id) = company_id {
            items = items.filter(contacts::company_id.eq(company_id.get()));
        }

        items
            .order(contacts::full_name.asc())
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(|db_contact| Contact::try_from(db_contact).map_err(RepositoryError::from))
            .collect()
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_new_contact = DbNewContact::from_domain(new_contact, Utc::now().naive_utc());

        let db_contact = diesel::insert_into(contacts::table)
            .values(&db_new_contact)
            .get_result::<DbContact>(&mut conn)?;

        Contact::try_from(db_contact).map_err(RepositoryError::from)
    }
}
