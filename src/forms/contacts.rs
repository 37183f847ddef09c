use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::NewContact;
use crate::domain::types::{CompanyId, ContactName, EmailAddress, HubId, PhoneNumber};
use crate::forms::{FormError, optional, parse_optional_id};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactForm {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQueryForm {
    pub company_id: Option<String>,
}

impl CreateContactForm {
    pub fn into_domain(self, hub_id: HubId) -> Result<NewContact, FormError> {
        self.validate()?;

        Ok(NewContact {
            hub_id,
            company_id: self.company_id.map(CompanyId::new).transpose()?,
            full_name: ContactName::new(self.full_name)?,
            email: optional(self.email, EmailAddress::new)?,
            phone: optional(self.phone, PhoneNumber::new)?,
        })
    }
}

impl ContactListQueryForm {
    pub fn company_id(&self) -> Result<Option<CompanyId>, FormError> {
        parse_optional_id(self.company_id.as_deref(), "companyId")
    }
}
