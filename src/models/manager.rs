//! Diesel models representing managers.

use diesel::prelude::*;

use crate::domain::manager::{Manager as DomainManager, NewManager as DomainNewManager};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::managers)]
/// Diesel model for [`crate::domain::manager::Manager`].
pub struct Manager {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::managers)]
/// Insertable form of [`Manager`].
pub struct NewManager<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: &'a str,
}

impl TryFrom<Manager> for DomainManager {
    type Error = TypeConstraintError;

    fn try_from(manager: Manager) -> Result<Self, Self::Error> {
        DomainManager::try_new(manager.id, manager.hub_id, manager.name, manager.email)
    }
}

impl<'a> From<&'a DomainNewManager> for NewManager<'a> {
    fn from(manager: &'a DomainNewManager) -> Self {
        Self {
            hub_id: manager.hub_id.get(),
            name: manager.name.as_str(),
            email: manager.email.as_str(),
        }
    }
}
