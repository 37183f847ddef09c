use serde::Deserialize;
use validator::Validate;

use crate::domain::prospect::NewProspect;
use crate::domain::types::{CompanyId, ContactId, HubId, ManagerId, ProspectName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProspectForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
}

impl CreateProspectForm {
    pub fn into_domain(self, hub_id: HubId, owner_id: ManagerId) -> Result<NewProspect, FormError> {
        self.validate()?;

        Ok(NewProspect {
            company_id: self.company_id.map(CompanyId::new).transpose()?,
            contact_id: self.contact_id.map(ContactId::new).transpose()?,
            ..NewProspect::new(hub_id, owner_id, ProspectName::new(self.name)?)
        })
    }
}
