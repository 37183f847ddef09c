use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::deal::{
    Deal as DomainDeal, DealStage, DealUpdate as DomainDealUpdate, NewDeal as DomainNewDeal,
};
use crate::domain::types::{
    Amount, CompanyId, ContactId, DealId, DealName, HubId, Label, ManagerId, RichText,
    TypeConstraintError, join_list, split_list,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::deals)]
/// Diesel model for [`crate::domain::deal::Deal`].
pub struct Deal {
    pub id: i32,
    pub hub_id: i32,
    pub owner_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub deal_name: String,
    pub stage: String,
    pub amount: f64,
    pub currency: String,
    pub priority: Option<String>,
    pub tags: String, // comma separated
    pub close_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub activity: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deals)]
pub struct NewDeal<'a> {
    pub hub_id: i32,
    pub owner_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub deal_name: &'a str,
    pub stage: &'static str,
    pub amount: f64,
    pub currency: &'a str,
    pub priority: Option<&'a str>,
    pub tags: String,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub activity: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::deals)]
pub struct UpdateDeal<'a> {
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub deal_name: Option<&'a str>,
    pub stage: Option<&'static str>,
    pub amount: Option<f64>,
    pub currency: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub tags: Option<String>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub activity: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Deal> for DomainDeal {
    type Error = TypeConstraintError;

    fn try_from(deal: Deal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DealId::new(deal.id)?,
            hub_id: HubId::new(deal.hub_id)?,
            owner_id: ManagerId::new(deal.owner_id)?,
            company_id: deal.company_id.map(CompanyId::new).transpose()?,
            contact_id: deal.contact_id.map(ContactId::new).transpose()?,
            deal_name: DealName::new(deal.deal_name)?,
            stage: deal.stage.parse::<DealStage>()?,
            amount: Amount::new(deal.amount)?,
            currency: Label::new(deal.currency)?,
            priority: deal.priority.map(Label::new).transpose()?,
            tags: split_list(&deal.tags),
            close_date: deal.close_date,
            notes: deal.notes.map(RichText::new).transpose()?,
            activity: deal.activity,
            created_at: deal.created_at,
            updated_at: deal.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDeal> for NewDeal<'a> {
    fn from(deal: &'a DomainNewDeal) -> Self {
        Self {
            hub_id: deal.hub_id.get(),
            owner_id: deal.owner_id.get(),
            company_id: deal.company_id.map(CompanyId::get),
            contact_id: deal.contact_id.map(ContactId::get),
            deal_name: deal.deal_name.as_str(),
            stage: deal.stage.as_str(),
            amount: deal.amount.get(),
            currency: deal.currency.as_str(),
            priority: deal.priority.as_deref(),
            tags: join_list(&deal.tags),
            close_date: deal.close_date,
            notes: deal.notes.as_ref().map(RichText::as_str),
            activity: deal.activity.as_deref(),
            created_at: deal.created_at,
            updated_at: deal.created_at,
        }
    }
}

impl<'a> UpdateDeal<'a> {
    pub fn from_domain(update: &'a DomainDealUpdate, now: NaiveDateTime) -> Self {
        Self {
            company_id: update.company_id.map(CompanyId::get),
            contact_id: update.contact_id.map(ContactId::get),
            deal_name: update.deal_name.as_deref(),
            stage: update.stage.map(DealStage::as_str),
            amount: update.amount.map(Amount::get),
            currency: update.currency.as_deref(),
            priority: update.priority.as_deref(),
            tags: update.tags.as_deref().map(join_list),
            close_date: update.close_date,
            notes: update.notes.as_ref().map(RichText::as_str),
            activity: update.activity.as_deref(),
            updated_at: now,
        }
    }
}
