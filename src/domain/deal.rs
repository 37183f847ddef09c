use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::{
    Amount, CompanyId, ContactId, DealId, DealName, HubId, Label, ManagerId, RichText,
};

string_enum!(
    /// Progress of a deal through the sales pipeline.
    DealStage {
        New => "New",
        Contacted => "Contacted",
        Proposal => "Proposal",
        Negotiation => "Negotiation",
        Won => "Won",
        Lost => "Lost",
    }
);

impl DealStage {
    /// Stages reached once the prospect has been contacted.
    pub const CONTACTED_OR_LATER: &'static [DealStage] = &[
        DealStage::Contacted,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::Won,
    ];
    /// Stages reached once a proposal has been sent.
    pub const PROPOSAL_OR_LATER: &'static [DealStage] =
        &[DealStage::Proposal, DealStage::Negotiation, DealStage::Won];
    /// Stages reached once negotiation has started.
    pub const NEGOTIATION_OR_LATER: &'static [DealStage] =
        &[DealStage::Negotiation, DealStage::Won];
}

/// Currency used when a deal does not specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub company_id: Option<CompanyId>,
    pub contact_id: Option<ContactId>,
    pub deal_name: DealName,
    pub stage: DealStage,
    pub amount: Amount,
    pub currency: Label,
    pub priority: Option<Label>,
    pub tags: Vec<String>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<RichText>,
    pub activity: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeal {
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub company_id: Option<CompanyId>,
    pub contact_id: Option<ContactId>,
    pub deal_name: DealName,
    pub stage: DealStage,
    pub amount: Amount,
    pub currency: Label,
    pub priority: Option<Label>,
    pub tags: Vec<String>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<RichText>,
    pub activity: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewDeal {
    /// Starts a deal in the `New` stage with a zero amount.
    #[must_use]
    pub fn new(hub_id: HubId, owner_id: ManagerId, deal_name: DealName) -> Self {
        Self {
            hub_id,
            owner_id,
            company_id: None,
            contact_id: None,
            deal_name,
            stage: DealStage::New,
            amount: Amount::default(),
            currency: Label::from_static(DEFAULT_CURRENCY),
            priority: None,
            tags: Vec::new(),
            close_date: None,
            notes: None,
            activity: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn stage(mut self, stage: DealStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealUpdate {
    pub company_id: Option<CompanyId>,
    pub contact_id: Option<ContactId>,
    pub deal_name: Option<DealName>,
    pub stage: Option<DealStage>,
    pub amount: Option<Amount>,
    pub currency: Option<Label>,
    pub priority: Option<Label>,
    pub tags: Option<Vec<String>>,
    pub close_date: Option<NaiveDate>,
    pub notes: Option<RichText>,
    pub activity: Option<String>,
}

impl DealUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
