//! Repository implementation for dashboard managers.

use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::{
        manager::{Manager, NewManager},
        types::{HubId, ManagerId},
    },
    models::manager::{Manager as DbManager, NewManager as DbNewManager},
    repository::{
        DieselRepository, ManagerReader, ManagerWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ManagerWriter for DieselRepository {
    fn create_or_update_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager> {
        use crate::schema::managers;

        let mut conn = self.conn()?;

        let db_new_manager: DbNewManager = new_manager.into();

        let db_manager = diesel::insert_into(managers::table)
            .values(&db_new_manager)
            .on_conflict((managers::email, managers::hub_id))
            .do_update()
            .set(managers::name.eq(excluded(managers::name)))
            .get_result::<DbManager>(&mut conn)?;

        Manager::try_from(db_manager).map_err(RepositoryError::from)
    }
}

impl ManagerReader for DieselRepository {
    fn get_manager_by_id(&self, id: ManagerId, hub_id: HubId) -> RepositoryResult<Option<Manager>> {
        use crate::schema::managers;

        let mut conn = self.conn()?;
        let db_manager = managers::table
            .filter(managers::id.eq(id.get()))
            .filter(managers::hub_id.eq(hub_id.get()))
            .first::<DbManager>(&mut conn)
            .optional()?;

        db_manager
            .map(Manager::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_managers(&self, hub_id: HubId) -> RepositoryResult<Vec<Manager>> {
        use crate::schema::managers;

        let mut conn = self.conn()?;
        managers::table
            .filter(managers::hub_id.eq(hub_id.get()))
            .order(managers::name.asc())
            .load::<DbManager>(&mut conn)?
            .into_iter()
            .map(|db_manager| Manager::try_from(db_manager).map_err(RepositoryError::from))
            .collect()
    }
}
