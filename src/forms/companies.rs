use serde::Deserialize;
use validator::Validate;

use crate::domain::company::{CompanyUpdate, NewCompany};
use crate::domain::types::{
    CompanyId, CompanyName, EmailAddress, HubId, Label, ManagerId, PhoneNumber, WebUrl,
};
use crate::forms::{FormError, non_blank, optional, parse_optional_id};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/admin/companies`.
pub struct CreateCompanyForm {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[validate(length(max = 50))]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `PATCH /api/admin/companies/{id}`; absent fields stay untouched.
pub struct UpdateCompanyForm {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[validate(length(max = 50))]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListQueryForm {
    pub owner_id: Option<String>,
}

/// `?ids=1,2&columns=fullName,email` of the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyExportQueryForm {
    pub ids: Option<String>,
    pub columns: Option<String>,
}

impl CreateCompanyForm {
    pub fn into_domain(self, hub_id: HubId, owner_id: ManagerId) -> Result<NewCompany, FormError> {
        self.validate()?;

        let company = NewCompany::new(
            hub_id,
            owner_id,
            CompanyName::new(self.full_name)?,
            optional(self.industry, Label::new)?,
            optional(self.status, Label::new)?,
        )
        .with_contacts(
            optional(self.email, EmailAddress::new)?,
            optional(self.phone, PhoneNumber::new)?,
            optional(self.website, WebUrl::new)?,
        );
        Ok(company)
    }
}

impl TryFrom<UpdateCompanyForm> for CompanyUpdate {
    type Error = FormError;

    fn try_from(form: UpdateCompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            full_name: optional(form.full_name, CompanyName::new)?,
            industry: optional(form.industry, Label::new)?,
            email: optional(form.email, EmailAddress::new)?,
            phone: optional(form.phone, PhoneNumber::new)?,
            website: optional(form.website, WebUrl::new)?,
            status: optional(form.status, Label::new)?,
        })
    }
}

impl CompanyListQueryForm {
    pub fn owner_id(&self) -> Result<Option<ManagerId>, FormError> {
        parse_optional_id(self.owner_id.as_deref(), "ownerId")
    }
}

impl CompanyExportQueryForm {
    /// Selected company ids; `None` exports every company.
    pub fn ids(&self) -> Result<Option<Vec<CompanyId>>, FormError> {
        let Some(raw) = non_blank(self.ids.clone()) else {
            return Ok(None);
        };
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<CompanyId>()
                    .map_err(|_| FormError::InvalidId("ids"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Requested column keys in the order given; `None` exports all columns.
    pub fn columns(&self) -> Option<Vec<String>> {
        non_blank(self.columns.clone()).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (HubId, ManagerId) {
        (HubId::new(1).unwrap(), ManagerId::new(2).unwrap())
    }

    #[test]
    fn create_applies_defaults_and_ignores_blank_fields() {
        let (hub, owner) = ids();
        let form = CreateCompanyForm {
            full_name: "Acme Corp".to_string(),
            industry: Some(" ".to_string()),
            email: Some("".to_string()),
            phone: None,
            website: Some("https://acme.example".to_string()),
            status: None,
        };
        let company = form.into_domain(hub, owner).unwrap();
        assert_eq!(company.industry.as_str(), "Unknown Industry");
        assert_eq!(company.status.as_str(), "Active");
        assert!(company.email.is_none());
        assert_eq!(company.website.unwrap().as_str(), "https://acme.example");
    }

    #[test]
    fn create_rejects_invalid_email() {
        let (hub, owner) = ids();
        let form = CreateCompanyForm {
            full_name: "Acme Corp".to_string(),
            industry: None,
            email: Some("not-an-email".to_string()),
            phone: None,
            website: None,
            status: None,
        };
        assert!(matches!(
            form.into_domain(hub, owner),
            Err(FormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn update_keeps_only_given_fields() {
        let form = UpdateCompanyForm {
            status: Some("Churned".to_string()),
            ..UpdateCompanyForm::default()
        };
        let update = CompanyUpdate::try_from(form).unwrap();
        assert_eq!(update.status.unwrap().as_str(), "Churned");
        assert!(update.full_name.is_none());
    }

    #[test]
    fn export_query_parses_ids_and_columns() {
        let form = CompanyExportQueryForm {
            ids: Some("1, 2,".to_string()),
            columns: Some("fullName,email".to_string()),
        };
        assert_eq!(
            form.ids().unwrap(),
            Some(vec![CompanyId::new(1).unwrap(), CompanyId::new(2).unwrap()])
        );
        assert_eq!(
            form.columns(),
            Some(vec!["fullName".to_string(), "email".to_string()])
        );

        let bad = CompanyExportQueryForm {
            ids: Some("1,x".to_string()),
            columns: None,
        };
        assert!(bad.ids().is_err());
    }
}
