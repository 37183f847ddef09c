use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::{CompanyId, ContactId, HubId, ManagerId, ProspectId, ProspectName};

/// Early-stage lead; counted as a "new deal" by the pipeline statistics.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub id: ProspectId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub company_id: Option<CompanyId>,
    pub contact_id: Option<ContactId>,
    pub name: ProspectName,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProspect {
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub company_id: Option<CompanyId>,
    pub contact_id: Option<ContactId>,
    pub name: ProspectName,
    pub created_at: NaiveDateTime,
}

impl NewProspect {
    #[must_use]
    pub fn new(hub_id: HubId, owner_id: ManagerId, name: ProspectName) -> Self {
        Self {
            hub_id,
            owner_id,
            company_id: None,
            contact_id: None,
            name,
            created_at: Utc::now().naive_utc(),
        }
    }
}
