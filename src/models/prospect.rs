use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::prospect::{NewProspect as DomainNewProspect, Prospect as DomainProspect};
use crate::domain::types::{
    CompanyId, ContactId, HubId, ManagerId, ProspectId, ProspectName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::prospects)]
pub struct Prospect {
    pub id: i32,
    pub hub_id: i32,
    pub owner_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::prospects)]
pub struct NewProspect<'a> {
    pub hub_id: i32,
    pub owner_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub name: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Prospect> for DomainProspect {
    type Error = TypeConstraintError;

    fn try_from(prospect: Prospect) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProspectId::new(prospect.id)?,
            hub_id: HubId::new(prospect.hub_id)?,
            owner_id: ManagerId::new(prospect.owner_id)?,
            company_id: prospect.company_id.map(CompanyId::new).transpose()?,
            contact_id: prospect.contact_id.map(ContactId::new).transpose()?,
            name: ProspectName::new(prospect.name)?,
            created_at: prospect.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewProspect> for NewProspect<'a> {
    fn from(prospect: &'a DomainNewProspect) -> Self {
        Self {
            hub_id: prospect.hub_id.get(),
            owner_id: prospect.owner_id.get(),
            company_id: prospect.company_id.map(CompanyId::get),
            contact_id: prospect.contact_id.map(ContactId::get),
            name: prospect.name.as_str(),
            created_at: prospect.created_at,
        }
    }
}
