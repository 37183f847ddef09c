use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::deal::{DealStage, DealUpdate, NewDeal};
use crate::domain::types::{
    Amount, CompanyId, ContactId, DealName, HubId, Label, ManagerId, RichText,
};
use crate::forms::stats::StatsQueryForm;
use crate::forms::{FormError, non_blank, optional};
use crate::repository::DealListQuery;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/admin/deals`.
pub struct CreateDealForm {
    #[validate(length(min = 1, max = 200))]
    pub deal_name: String,
    pub stage: Option<DealStage>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub activity: Option<String>,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `PATCH /api/admin/deals/{id}`.
pub struct UpdateDealForm {
    #[validate(length(min = 1, max = 200))]
    pub deal_name: Option<String>,
    pub stage: Option<DealStage>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub activity: Option<String>,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
}

/// Filters of `GET /api/admin/deals`: the stats filters plus a stage.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealListQueryForm {
    #[serde(flatten)]
    pub filters: StatsQueryForm,
    pub stage: Option<String>,
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags.into_iter().filter_map(|tag| non_blank(Some(tag))) {
        if !cleaned.contains(&tag) {
            cleaned.push(tag);
        }
    }
    cleaned
}

impl CreateDealForm {
    pub fn into_domain(self, hub_id: HubId, owner_id: ManagerId) -> Result<NewDeal, FormError> {
        self.validate()?;

        let mut deal = NewDeal::new(hub_id, owner_id, DealName::new(self.deal_name)?)
            .stage(self.stage.unwrap_or(DealStage::New))
            .amount(Amount::new(self.amount.unwrap_or_default())?);
        if let Some(currency) = optional(self.currency, |c| Label::new(c.to_uppercase()))? {
            deal.currency = currency;
        }
        deal.priority = optional(self.priority, Label::new)?;
        deal.tags = clean_tags(self.tags);
        deal.close_date = self.close_date;
        deal.notes = optional(self.notes, RichText::new)?;
        deal.activity = non_blank(self.activity);
        deal.company_id = self.company_id.map(CompanyId::new).transpose()?;
        deal.contact_id = self.contact_id.map(ContactId::new).transpose()?;
        Ok(deal)
    }
}

impl TryFrom<UpdateDealForm> for DealUpdate {
    type Error = FormError;

    fn try_from(form: UpdateDealForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            company_id: form.company_id.map(CompanyId::new).transpose()?,
            contact_id: form.contact_id.map(ContactId::new).transpose()?,
            deal_name: optional(form.deal_name, DealName::new)?,
            stage: form.stage,
            amount: form.amount.map(Amount::new).transpose()?,
            currency: optional(form.currency, |c| Label::new(c.to_uppercase()))?,
            priority: optional(form.priority, Label::new)?,
            tags: form.tags.map(clean_tags),
            close_date: form.close_date,
            notes: optional(form.notes, RichText::new)?,
            activity: non_blank(form.activity),
        })
    }
}

impl DealListQueryForm {
    pub fn into_query(self, hub_id: HubId) -> Result<DealListQuery, FormError> {
        let mut query = DealListQuery::new(hub_id).filters(self.filters.filters()?);
        if let Some(stage) = non_blank(self.stage) {
            let stage = stage
                .parse::<DealStage>()
                .map_err(|_| FormError::InvalidParameter("stage"))?;
            query = query.stage(stage);
        }
        Ok(query)
    }
}
