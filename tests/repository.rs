use chrono::{Duration, TimeZone, Utc};
use dealboard::domain::activity::{ActivityAction, EntityType, NewActivity};
use dealboard::domain::company::{CompanyUpdate, NewCompany};
use dealboard::domain::contact::NewContact;
use dealboard::domain::deal::{DealStage, DealUpdate, NewDeal};
use dealboard::domain::manager::{Manager, NewManager};
use dealboard::domain::meeting::NewMeeting;
use dealboard::domain::prospect::NewProspect;
use dealboard::domain::stats::{DateWindow, StatsFilters};
use dealboard::domain::todo::{NewTodo, TodoStatus, TodoUpdate};
use dealboard::domain::types::{
    Amount, CompanyName, ContactName, DealName, EmailAddress, HubId, Label, ManagerName,
    ProspectName, Title,
};
use dealboard::repository::errors::RepositoryError;
use dealboard::repository::{
    ActivityReader, ActivityWriter, CompanyListQuery, CompanyReader, CompanyWriter,
    ContactReader, ContactWriter, DealListQuery, DealReader, DealStatsQuery, DealWriter,
    DieselRepository, ManagerReader, ManagerWriter, MeetingListQuery, MeetingReader,
    MeetingWriter, ProspectWriter, StageFilter, StatsReader, TodoListQuery, TodoReader,
    TodoWriter,
};

mod common;

fn hub() -> HubId {
    HubId::new(1).unwrap()
}

fn manager(repo: &DieselRepository, email: &str) -> Manager {
    repo.create_or_update_manager(&NewManager {
        hub_id: hub(),
        name: ManagerName::new("Ann").unwrap(),
        email: EmailAddress::new(email).unwrap(),
    })
    .unwrap()
}

#[test]
fn manager_upsert_keeps_one_row_per_email() {
    let test_db = common::TestDb::new("managers.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = manager(&repo, "ann@example.com");
    let renamed = repo
        .create_or_update_manager(&NewManager {
            hub_id: hub(),
            name: ManagerName::new("Ann Smith").unwrap(),
            email: EmailAddress::new("ann@example.com").unwrap(),
        })
        .unwrap();

    assert_eq!(first.id, renamed.id);
    assert_eq!(renamed.name.as_str(), "Ann Smith");
    assert_eq!(repo.list_managers(hub()).unwrap().len(), 1);
    assert!(repo.get_manager_by_id(first.id, hub()).unwrap().is_some());
}

#[test]
fn company_crud_is_scoped_to_the_hub() {
    let test_db = common::TestDb::new("companies.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = manager(&repo, "ann@example.com");

    let acme = repo
        .create_company(&NewCompany::new(
            hub(),
            owner.id,
            CompanyName::new("Acme Corp").unwrap(),
            None,
            None,
        ))
        .unwrap();
    let globex = repo
        .create_company(&NewCompany::new(
            hub(),
            owner.id,
            CompanyName::new("Globex").unwrap(),
            Some(Label::new("Energy").unwrap()),
            None,
        ))
        .unwrap();
    assert_eq!(acme.industry.as_str(), "Unknown Industry");

    let other_hub = HubId::new(2).unwrap();
    assert!(repo.get_company_by_id(acme.id, other_hub).unwrap().is_none());

    let subset = repo
        .list_companies(CompanyListQuery::new(hub()).ids(vec![globex.id]))
        .unwrap();
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].full_name.as_str(), "Globex");

    let updated = repo
        .update_company(
            acme.id,
            hub(),
            &CompanyUpdate {
                status: Some(Label::new("Inactive").unwrap()),
                ..CompanyUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status.as_str(), "Inactive");
    assert_eq!(updated.full_name.as_str(), "Acme Corp");

    repo.delete_company(acme.id, hub()).unwrap();
    assert!(matches!(
        repo.delete_company(acme.id, hub()),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.update_company(acme.id, hub(), &CompanyUpdate::default()),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn deleting_a_company_detaches_its_contacts_and_deals() {
    let test_db = common::TestDb::new("detach.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = manager(&repo, "ann@example.com");
    let company = repo
        .create_company(&NewCompany::new(
            hub(),
            owner.id,
            CompanyName::new("Acme Corp").unwrap(),
            None,
            None,
        ))
        .unwrap();
    let contact = repo
        .create_contact(&NewContact {
            hub_id: hub(),
            company_id: Some(company.id),
            full_name: ContactName::new("Jane Doe").unwrap(),
            email: None,
            phone: None,
        })
        .unwrap();
    let mut new_deal = NewDeal::new(hub(), owner.id, DealName::new("Renewal").unwrap());
    new_deal.company_id = Some(company.id);
    let deal = repo.create_deal(&new_deal).unwrap();

    repo.delete_company(company.id, hub()).unwrap();

    let contacts = repo.list_contacts(hub(), None).unwrap();
    assert_eq!(contacts[0].id, contact.id);
    assert_eq!(contacts[0].company_id, None);
    let deal = repo.get_deal_by_id(deal.id, hub()).unwrap().unwrap();
    assert_eq!(deal.company_id, None);
}

#[test]
fn deals_round_trip_tags_and_filter_by_stage() {
    let test_db = common::TestDb::new("deals.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = manager(&repo, "ann@example.com");

    let mut renewal = NewDeal::new(hub(), owner.id, DealName::new("Renewal").unwrap())
        .stage(DealStage::Won)
        .amount(Amount::new(1200.0).unwrap());
    renewal.tags = vec!["Enterprise".to_string(), "Q3".to_string()];
    let renewal = repo.create_deal(&renewal).unwrap();
    repo.create_deal(&NewDeal::new(hub(), owner.id, DealName::new("Pilot").unwrap()))
        .unwrap();

    assert_eq!(renewal.tags, vec!["Enterprise", "Q3"]);

    let won = repo
        .list_deals(DealListQuery::new(hub()).stage(DealStage::Won))
        .unwrap();
    assert_eq!(won.len(), 1);
    assert_eq!(won[0].id, renewal.id);

    let moved = repo
        .update_deal(
            renewal.id,
            hub(),
            &DealUpdate {
                stage: Some(DealStage::Lost),
                ..DealUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(moved.stage, DealStage::Lost);
    assert_eq!(moved.amount.get(), 1200.0);
}

#[test]
fn stats_queries_respect_window_stage_and_filters() {
    let test_db = common::TestDb::new("stats.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = manager(&repo, "ann@example.com");
    let bob = manager(&repo, "bob@example.com");

    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let window = DateWindow {
        start,
        end: start + Duration::days(31),
    };
    let inside = (start + Duration::days(3)).naive_utc();
    let before = (start - Duration::days(3)).naive_utc();

    let deals = [
        (ann.id, DealStage::Won, 500.0, inside),
        (ann.id, DealStage::Negotiation, 300.0, inside),
        (ann.id, DealStage::Lost, 1000.0, inside),
        (bob.id, DealStage::New, 50.0, inside),
        (ann.id, DealStage::Won, 700.0, before),
    ];
    for (owner, stage, amount, created_at) in deals {
        let mut deal = NewDeal::new(hub(), owner, DealName::new("Deal").unwrap())
            .stage(stage)
            .amount(Amount::new(amount).unwrap());
        deal.created_at = created_at;
        repo.create_deal(&deal).unwrap();
    }
    let mut prospect = NewProspect::new(hub(), ann.id, ProspectName::new("Lead").unwrap());
    prospect.created_at = inside;
    repo.create_prospect(&prospect).unwrap();

    let current = DealStatsQuery::new(hub(), Some(window), StatsFilters::default());
    assert_eq!(repo.count_deals(&current).unwrap(), 4);
    assert_eq!(
        repo.count_deals(&current.stages(StageFilter::NotIn(&[DealStage::Won, DealStage::Lost])))
            .unwrap(),
        2
    );
    assert_eq!(
        repo.count_deals(&current.stages(StageFilter::In(DealStage::CONTACTED_OR_LATER)))
            .unwrap(),
        2
    );
    assert_eq!(
        repo.sum_deal_amount(&current.stages(StageFilter::NotIn(&[DealStage::Lost])))
            .unwrap(),
        850.0
    );
    assert_eq!(repo.count_prospects(&current).unwrap(), 1);

    let previous = DealStatsQuery::new(hub(), Some(window.previous()), StatsFilters::default());
    assert_eq!(repo.count_deals(&previous).unwrap(), 1);

    let bobs = DealStatsQuery::new(
        hub(),
        None,
        StatsFilters {
            owner_id: Some(bob.id),
            ..StatsFilters::default()
        },
    );
    assert_eq!(repo.count_deals(&bobs).unwrap(), 1);
    assert_eq!(repo.count_prospects(&bobs).unwrap(), 0);
    assert_eq!(
        repo.sum_deal_amount(&bobs.stages(StageFilter::In(&[DealStage::Won])))
            .unwrap(),
        0.0
    );
}

#[test]
fn todo_updates_and_owner_filter() {
    let test_db = common::TestDb::new("todos.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = manager(&repo, "ann@example.com");
    let bob = manager(&repo, "bob@example.com");

    let call = repo
        .create_todo(&NewTodo::new(hub(), ann.id, Title::new("Call Acme").unwrap()))
        .unwrap();
    repo.create_todo(&NewTodo::new(hub(), bob.id, Title::new("Send quote").unwrap()))
        .unwrap();

    let anns = repo
        .list_todos(TodoListQuery::new(hub()).owner(ann.id))
        .unwrap();
    assert_eq!(anns.len(), 1);
    assert_eq!(anns[0].id, call.id);

    let done = repo
        .update_todo(
            call.id,
            hub(),
            &TodoUpdate {
                status: Some(TodoStatus::Done),
                ..TodoUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(done.status, TodoStatus::Done);
    assert!(done.updated_at >= call.updated_at);

    repo.delete_todo(call.id, hub()).unwrap();
    assert!(repo.get_todo_by_id(call.id, hub()).unwrap().is_none());
}

#[test]
fn meetings_are_listed_by_overlap() {
    let test_db = common::TestDb::new("meetings.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = manager(&repo, "ann@example.com");
    let at = |day: u32, hour: u32| {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
            .unwrap()
            .naive_utc()
    };

    let morning = repo
        .create_meeting(
            &NewMeeting::try_new(hub(), ann.id, Title::new("Standup").unwrap(), at(10, 9), at(10, 10))
                .unwrap(),
        )
        .unwrap();
    repo.create_meeting(
        &NewMeeting::try_new(hub(), ann.id, Title::new("Review").unwrap(), at(12, 14), at(12, 15))
            .unwrap(),
    )
    .unwrap();

    let found = repo
        .list_meetings(MeetingListQuery::new(hub()).between(Some(at(10, 9)), Some(at(11, 0))))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, morning.id);
    assert!(repo.get_meeting_by_id(morning.id, hub()).unwrap().is_some());

    let all = repo.list_meetings(MeetingListQuery::new(hub())).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].starts_at < all[1].starts_at);
}

#[test]
fn activity_feed_is_newest_first_with_performer() {
    let test_db = common::TestDb::new("activity.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = manager(&repo, "ann@example.com");

    for (entity_id, action) in [(1, ActivityAction::Created), (1, ActivityAction::Updated)] {
        repo.record_activity(&NewActivity::new(&ann, EntityType::Deal, entity_id, action))
            .unwrap();
    }

    let feed = repo.list_recent_activity(hub(), 10).unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].activity.action, ActivityAction::Updated);
    assert_eq!(feed[0].performed_by.email.as_str(), "ann@example.com");

    let limited = repo.list_recent_activity(hub(), 1).unwrap();
    assert_eq!(limited.len(), 1);
}
