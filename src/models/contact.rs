use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{Contact as DomainContact, NewContact as DomainNewContact};
use crate::domain::types::{
    CompanyId, ContactId, ContactName, EmailAddress, HubId, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct Contact {
    pub id: i32,
    pub hub_id: i32,
    pub company_id: Option<i32>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct NewContact<'a> {
    pub hub_id: i32,
    pub company_id: Option<i32>,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(contact.id)?,
            hub_id: HubId::new(contact.hub_id)?,
            company_id: contact.company_id.map(CompanyId::new).transpose()?,
            full_name: ContactName::new(contact.full_name)?,
            email: contact.email.map(EmailAddress::new).transpose()?,
            phone: contact.phone.map(PhoneNumber::new).transpose()?,
            created_at: contact.created_at,
        })
    }
}

impl<'a> NewContact<'a> {
    pub fn from_domain(contact: &'a DomainNewContact, now: NaiveDateTime) -> Self {
        Self {
            hub_id: contact.hub_id.get(),
            company_id: contact.company_id.map(CompanyId::get),
            full_name: contact.full_name.as_str(),
            email: contact.email.as_ref().map(EmailAddress::as_str),
            phone: contact.phone.as_ref().map(PhoneNumber::as_str),
            created_at: now,
        }
    }
}
