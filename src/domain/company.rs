use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    CompanyId, CompanyName, EmailAddress, HubId, Label, ManagerId, PhoneNumber, WebUrl,
};

/// Industry assigned when none is supplied.
pub const DEFAULT_INDUSTRY: &str = "Unknown Industry";
/// Status assigned when none is supplied.
pub const DEFAULT_STATUS: &str = "Active";

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub full_name: CompanyName,
    pub industry: Label,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub status: Label,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCompany {
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub full_name: CompanyName,
    pub industry: Label,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub status: Label,
}

impl NewCompany {
    /// Builds a company applying the default industry and status when absent.
    #[must_use]
    pub fn new(
        hub_id: HubId,
        owner_id: ManagerId,
        full_name: CompanyName,
        industry: Option<Label>,
        status: Option<Label>,
    ) -> Self {
        Self {
            hub_id,
            owner_id,
            full_name,
            industry: industry.unwrap_or_else(default_industry),
            email: None,
            phone: None,
            website: None,
            status: status.unwrap_or_else(default_status),
        }
    }

    #[must_use]
    pub fn with_contacts(
        mut self,
        email: Option<EmailAddress>,
        phone: Option<PhoneNumber>,
        website: Option<WebUrl>,
    ) -> Self {
        self.email = email;
        self.phone = phone;
        self.website = website;
        self
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyUpdate {
    pub full_name: Option<CompanyName>,
    pub industry: Option<Label>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub website: Option<WebUrl>,
    pub status: Option<Label>,
}

impl CompanyUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn default_industry() -> Label {
    Label::from_static(DEFAULT_INDUSTRY)
}

fn default_status() -> Label {
    Label::from_static(DEFAULT_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_company_applies_defaults() {
        let company = NewCompany::new(
            HubId::new(1).unwrap(),
            ManagerId::new(2).unwrap(),
            CompanyName::new("Acme Corp").unwrap(),
            None,
            None,
        );
        assert_eq!(company.industry.as_str(), DEFAULT_INDUSTRY);
        assert_eq!(company.status.as_str(), DEFAULT_STATUS);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(CompanyUpdate::default().is_empty());
        let update = CompanyUpdate {
            status: Some(Label::new("Inactive").unwrap()),
            ..CompanyUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
