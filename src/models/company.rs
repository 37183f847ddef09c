use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, CompanyUpdate as DomainCompanyUpdate,
    NewCompany as DomainNewCompany,
};
use crate::domain::types::{
    CompanyId, CompanyName, EmailAddress, HubId, Label, ManagerId, PhoneNumber,
    TypeConstraintError, WebUrl,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: i32,
    pub hub_id: i32,
    pub owner_id: i32,
    pub full_name: String,
    pub industry: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub hub_id: i32,
    pub owner_id: i32,
    pub full_name: &'a str,
    pub industry: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
/// Data used when updating a [`Company`] record; `None` columns are skipped.
pub struct UpdateCompany<'a> {
    pub full_name: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub status: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::new(company.id)?,
            hub_id: HubId::new(company.hub_id)?,
            owner_id: ManagerId::new(company.owner_id)?,
            full_name: CompanyName::new(company.full_name)?,
            industry: Label::new(company.industry)?,
            email: company.email.map(EmailAddress::new).transpose()?,
            phone: company.phone.map(PhoneNumber::new).transpose()?,
            website: company.website.map(WebUrl::new).transpose()?,
            status: Label::new(company.status)?,
            created_at: company.created_at,
            updated_at: company.updated_at,
        })
    }
}

impl<'a> NewCompany<'a> {
    pub fn from_domain(company: &'a DomainNewCompany, now: NaiveDateTime) -> Self {
        Self {
            hub_id: company.hub_id.get(),
            owner_id: company.owner_id.get(),
            full_name: company.full_name.as_str(),
            industry: company.industry.as_str(),
            email: company.email.as_ref().map(EmailAddress::as_str),
            phone: company.phone.as_ref().map(PhoneNumber::as_str),
            website: company.website.as_ref().map(WebUrl::as_str),
            status: company.status.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateCompany<'a> {
    pub fn from_domain(update: &'a DomainCompanyUpdate, now: NaiveDateTime) -> Self {
        Self {
            full_name: update.full_name.as_deref(),
            industry: update.industry.as_deref(),
            email: update.email.as_ref().map(EmailAddress::as_str),
            phone: update.phone.as_ref().map(PhoneNumber::as_str),
            website: update.website.as_ref().map(WebUrl::as_str),
            status: update.status.as_deref(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn update_skips_missing_fields() {
        let update = DomainCompanyUpdate {
            status: Some(Label::new("Inactive").unwrap()),
            ..DomainCompanyUpdate::default()
        };
        let now = Utc::now().naive_utc();
        let db = UpdateCompany::from_domain(&update, now);
        assert_eq!(db.status, Some("Inactive"));
        assert_eq!(db.full_name, None);
        assert_eq!(db.updated_at, now);
    }

    #[test]
    fn db_company_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Company {
            id: 4,
            hub_id: 1,
            owner_id: 2,
            full_name: "Acme".to_string(),
            industry: "Software".to_string(),
            email: Some("info@acme.test".to_string()),
            phone: None,
            website: Some("https://acme.test".to_string()),
            status: "Active".to_string(),
            created_at: now,
            updated_at: now,
        };
        let company = DomainCompany::try_from(db).unwrap();
        assert_eq!(company.id.get(), 4);
        assert_eq!(company.full_name.as_str(), "Acme");
        assert_eq!(company.email.unwrap().as_str(), "info@acme.test");
    }

    #[test]
    fn corrupt_row_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Company {
            id: 4,
            hub_id: 1,
            owner_id: 2,
            full_name: "   ".to_string(),
            industry: "Software".to_string(),
            email: None,
            phone: None,
            website: None,
            status: "Active".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainCompany::try_from(db),
            Err(TypeConstraintError::EmptyString)
        );
    }
}
