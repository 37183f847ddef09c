//! Persistence traits and their Diesel implementation.
//!
//! Every aggregate gets a `*Reader` and a `*Writer` trait so services can ask
//! for exactly the capabilities they use. [`DieselRepository`] implements all
//! of them on top of the SQLite pool.

use chrono::NaiveDateTime;

use crate::{
    db::{DbConnection, DbPool},
    domain::{
        activity::{Activity, ActivityEntry, NewActivity},
        company::{Company, CompanyUpdate, NewCompany},
        contact::{Contact, NewContact},
        deal::{Deal, DealStage, DealUpdate, NewDeal},
        manager::{Manager, NewManager},
        meeting::{Meeting, MeetingUpdate, NewMeeting},
        prospect::{NewProspect, Prospect},
        stats::{DateWindow, StatsFilters},
        todo::{NewTodo, Todo, TodoUpdate},
        types::{
            CompanyId, DealId, HubId, ManagerId, MeetingId, TodoId,
        },
    },
    repository::errors::RepositoryResult,
};

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod errors;
pub mod manager;
pub mod meeting;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod prospect;
pub mod stats;
pub mod todo;

/// Diesel-backed repository sharing one connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyListQuery {
    pub hub_id: HubId,
    pub owner_id: Option<ManagerId>,
    /// Restricts the listing to these ids (used by exports).
    pub ids: Option<Vec<CompanyId>>,
}

impl CompanyListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            owner_id: None,
            ids: None,
        }
    }

    pub fn owner(mut self, owner_id: ManagerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn ids(mut self, ids: Vec<CompanyId>) -> Self {
        self.ids = Some(ids);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealListQuery {
    pub hub_id: HubId,
    pub filters: StatsFilters,
    pub stage: Option<DealStage>,
}

impl DealListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            filters: StatsFilters::default(),
            stage: None,
        }
    }

    pub fn filters(mut self, filters: StatsFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn stage(mut self, stage: DealStage) -> Self {
        self.stage = Some(stage);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoListQuery {
    pub hub_id: HubId,
    pub owner_id: Option<ManagerId>,
}

impl TodoListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            owner_id: None,
        }
    }

    pub fn owner(mut self, owner_id: ManagerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// Meetings overlapping the optional `[from, to)` interval.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingListQuery {
    pub hub_id: HubId,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl MeetingListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            from: None,
            to: None,
        }
    }

    pub fn between(mut self, from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Stage restriction applied to a deal metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageFilter {
    #[default]
    Any,
    In(&'static [DealStage]),
    NotIn(&'static [DealStage]),
}

/// One aggregate over deals or prospects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealStatsQuery {
    pub hub_id: HubId,
    /// `None` covers all time.
    pub window: Option<DateWindow>,
    pub filters: StatsFilters,
    pub stages: StageFilter,
}

impl DealStatsQuery {
    pub fn new(hub_id: HubId, window: Option<DateWindow>, filters: StatsFilters) -> Self {
        Self {
            hub_id,
            window,
            filters,
            stages: StageFilter::Any,
        }
    }

    pub fn stages(mut self, stages: StageFilter) -> Self {
        self.stages = stages;
        self
    }
}

pub trait ManagerReader {
    fn get_manager_by_id(&self, id: ManagerId, hub_id: HubId) -> RepositoryResult<Option<Manager>>;
    fn list_managers(&self, hub_id: HubId) -> RepositoryResult<Vec<Manager>>;
}

pub trait ManagerWriter {
    fn create_or_update_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager>;
}

pub trait CompanyReader {
    fn get_company_by_id(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<Vec<Company>>;
}

pub trait CompanyWriter {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    fn update_company(
        &self,
        id: CompanyId,
        hub_id: HubId,
        updates: &CompanyUpdate,
    ) -> RepositoryResult<Company>;
    fn delete_company(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn list_contacts(
        &self,
        hub_id: HubId,
        company_id: Option<CompanyId>,
    ) -> RepositoryResult<Vec<Contact>>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
}

pub trait ProspectReader {
    fn list_prospects(&self, hub_id: HubId) -> RepositoryResult<Vec<Prospect>>;
}

pub trait ProspectWriter {
    fn create_prospect(&self, new_prospect: &NewProspect) -> RepositoryResult<Prospect>;
}

pub trait DealReader {
    fn get_deal_by_id(&self, id: DealId, hub_id: HubId) -> RepositoryResult<Option<Deal>>;
    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>>;
}

pub trait DealWriter {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
    fn update_deal(&self, id: DealId, hub_id: HubId, updates: &DealUpdate)
    -> RepositoryResult<Deal>;
    fn delete_deal(&self, id: DealId, hub_id: HubId) -> RepositoryResult<()>;
}

/// Aggregates behind the pipeline statistics.
pub trait StatsReader {
    fn count_deals(&self, query: &DealStatsQuery) -> RepositoryResult<i64>;
    /// Prospects ignore [`DealStatsQuery::stages`].
    fn count_prospects(&self, query: &DealStatsQuery) -> RepositoryResult<i64>;
    fn sum_deal_amount(&self, query: &DealStatsQuery) -> RepositoryResult<f64>;
}

pub trait MeetingReader {
    fn get_meeting_by_id(&self, id: MeetingId, hub_id: HubId)
    -> RepositoryResult<Option<Meeting>>;
    fn list_meetings(&self, query: MeetingListQuery) -> RepositoryResult<Vec<Meeting>>;
}

pub trait MeetingWriter {
    fn create_meeting(&self, new_meeting: &NewMeeting) -> RepositoryResult<Meeting>;
    fn update_meeting(
        &self,
        id: MeetingId,
        hub_id: HubId,
        updates: &MeetingUpdate,
    ) -> RepositoryResult<Meeting>;
    fn delete_meeting(&self, id: MeetingId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait TodoReader {
    fn get_todo_by_id(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<Option<Todo>>;
    fn list_todos(&self, query: TodoListQuery) -> RepositoryResult<Vec<Todo>>;
}

pub trait TodoWriter {
    fn create_todo(&self, new_todo: &NewTodo) -> RepositoryResult<Todo>;
    fn update_todo(&self, id: TodoId, hub_id: HubId, updates: &TodoUpdate)
    -> RepositoryResult<Todo>;
    fn delete_todo(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait ActivityReader {
    /// Newest first, joined with the performing manager.
    fn list_recent_activity(&self, hub_id: HubId, limit: i64)
    -> RepositoryResult<Vec<ActivityEntry>>;
}

pub trait ActivityWriter {
    fn record_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
}
