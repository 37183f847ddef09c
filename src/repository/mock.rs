//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::activity::{Activity, ActivityEntry, NewActivity};
use crate::domain::company::{Company, CompanyUpdate, NewCompany};
use crate::domain::contact::{Contact, NewContact};
use crate::domain::deal::{Deal, DealUpdate, NewDeal};
use crate::domain::manager::{Manager, NewManager};
use crate::domain::meeting::{Meeting, MeetingUpdate, NewMeeting};
use crate::domain::prospect::{NewProspect, Prospect};
use crate::domain::todo::{NewTodo, Todo, TodoUpdate};
use crate::domain::types::{CompanyId, DealId, HubId, ManagerId, MeetingId, TodoId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityReader, ActivityWriter, CompanyListQuery, CompanyReader, CompanyWriter,
    ContactReader, ContactWriter, DealListQuery, DealReader, DealStatsQuery, DealWriter,
    ManagerReader, ManagerWriter, MeetingListQuery, MeetingReader, MeetingWriter, ProspectReader,
    ProspectWriter, StatsReader, TodoListQuery, TodoReader, TodoWriter,
};

mock! {
    pub Repository {}

    impl ManagerReader for Repository {
        fn get_manager_by_id(&self, id: ManagerId, hub_id: HubId) -> RepositoryResult<Option<Manager>>;
        fn list_managers(&self, hub_id: HubId) -> RepositoryResult<Vec<Manager>>;
    }

    impl ManagerWriter for Repository {
        fn create_or_update_manager(&self, new_manager: &NewManager) -> RepositoryResult<Manager>;
    }

    impl CompanyReader for Repository {
        fn get_company_by_id(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<Option<Company>>;
        fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<Vec<Company>>;
    }

    impl CompanyWriter for Repository {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
        fn update_company(
            &self,
            id: CompanyId,
            hub_id: HubId,
            updates: &CompanyUpdate,
        ) -> RepositoryResult<Company>;
        fn delete_company(&self, id: CompanyId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn list_contacts(
            &self,
            hub_id: HubId,
            company_id: Option<CompanyId>,
        ) -> RepositoryResult<Vec<Contact>>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    }

    impl ProspectReader for Repository {
        fn list_prospects(&self, hub_id: HubId) -> RepositoryResult<Vec<Prospect>>;
    }

    impl ProspectWriter for Repository {
        fn create_prospect(&self, new_prospect: &NewProspect) -> RepositoryResult<Prospect>;
    }

    impl DealReader for Repository {
        fn get_deal_by_id(&self, id: DealId, hub_id: HubId) -> RepositoryResult<Option<Deal>>;
        fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>>;
    }

    impl DealWriter for Repository {
        fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
        fn update_deal(&self, id: DealId, hub_id: HubId, updates: &DealUpdate) -> RepositoryResult<Deal>;
        fn delete_deal(&self, id: DealId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl StatsReader for Repository {
        fn count_deals(&self, query: &DealStatsQuery) -> RepositoryResult<i64>;
        fn count_prospects(&self, query: &DealStatsQuery) -> RepositoryResult<i64>;
        fn sum_deal_amount(&self, query: &DealStatsQuery) -> RepositoryResult<f64>;
    }

    impl MeetingReader for Repository {
        fn get_meeting_by_id(&self, id: MeetingId, hub_id: HubId) -> RepositoryResult<Option<Meeting>>;
        fn list_meetings(&self, query: MeetingListQuery) -> RepositoryResult<Vec<Meeting>>;
    }

    impl MeetingWriter for Repository {
        fn create_meeting(&self, new_meeting: &NewMeeting) -> RepositoryResult<Meeting>;
        fn update_meeting(
            &self,
            id: MeetingId,
            hub_id: HubId,
            updates: &MeetingUpdate,
        ) -> RepositoryResult<Meeting>;
        fn delete_meeting(&self, id: MeetingId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl TodoReader for Repository {
        fn get_todo_by_id(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<Option<Todo>>;
        fn list_todos(&self, query: TodoListQuery) -> RepositoryResult<Vec<Todo>>;
    }

    impl TodoWriter for Repository {
        fn create_todo(&self, new_todo: &NewTodo) -> RepositoryResult<Todo>;
        fn update_todo(&self, id: TodoId, hub_id: HubId, updates: &TodoUpdate) -> RepositoryResult<Todo>;
        fn delete_todo(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl ActivityReader for Repository {
        fn list_recent_activity(&self, hub_id: HubId, limit: i64) -> RepositoryResult<Vec<ActivityEntry>>;
    }

    impl ActivityWriter for Repository {
        fn record_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
    }
}
