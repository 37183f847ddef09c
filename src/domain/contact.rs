use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{CompanyId, ContactId, ContactName, EmailAddress, HubId, PhoneNumber};

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub company_id: Option<CompanyId>,
    pub full_name: ContactName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewContact {
    pub hub_id: HubId,
    pub company_id: Option<CompanyId>,
    pub full_name: ContactName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
}
