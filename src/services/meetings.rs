use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::meeting::{Meeting, MeetingUpdate};
use crate::domain::types::MeetingId;
use crate::forms::meetings::{CreateMeetingForm, MeetingRangeQueryForm, UpdateMeetingForm};
use crate::repository::{
    ActivityWriter, ManagerWriter, MeetingListQuery, MeetingReader, MeetingWriter,
};
use crate::services::{ServiceError, ServiceResult, current_manager, ensure_role, hub_of, record};

/// Meetings overlapping `[from, to)`, earliest first.
pub fn list_meetings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: MeetingRangeQueryForm,
) -> ServiceResult<Vec<Meeting>>
where
    R: MeetingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate_range()?;
    let query = MeetingListQuery::new(hub_of(user)?).between(form.from, form.to);
    Ok(repo.list_meetings(query)?)
}

pub fn get_meeting<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Meeting>
where
    R: MeetingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    repo.get_meeting_by_id(MeetingId::new(id)?, hub_of(user)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_meeting<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateMeetingForm,
) -> ServiceResult<Meeting>
where
    R: MeetingWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_meeting = form.into_domain(manager.hub_id, manager.id)?;

    let meeting = repo.create_meeting(&new_meeting)?;
    record(repo, &manager, EntityType::Meeting, meeting.id, ActivityAction::Created);
    Ok(meeting)
}

/// Applies a partial update; moving only one end of the interval is checked
/// against the stored other end.
pub fn update_meeting<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateMeetingForm,
) -> ServiceResult<Meeting>
where
    R: MeetingReader + MeetingWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = MeetingId::new(id)?;
    let updates = MeetingUpdate::try_from(form)?;
    let hub_id = hub_of(user)?;

    let current = repo
        .get_meeting_by_id(id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    updates.validate_against(&current)?;

    let manager = current_manager(repo, user)?;
    let meeting = repo.update_meeting(id, hub_id, &updates)?;
    record(repo, &manager, EntityType::Meeting, meeting.id, ActivityAction::Updated);
    Ok(meeting)
}

pub fn delete_meeting<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: MeetingWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = MeetingId::new(id)?;
    let manager = current_manager(repo, user)?;

    repo.delete_meeting(id, manager.hub_id)?;
    record(repo, &manager, EntityType::Meeting, id, ActivityAction::Deleted);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::meeting::{MeetingStatus, RepeatFrequency};
    use crate::domain::types::{HubId, ManagerId, Title};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;
    use chrono::NaiveDate;

    fn at(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn meeting(id: MeetingId) -> Meeting {
        Meeting {
            id,
            hub_id: HubId::new(1).unwrap(),
            owner_id: ManagerId::new(5).unwrap(),
            title: Title::new("Demo").unwrap(),
            description: None,
            starts_at: at(10),
            ends_at: at(11),
            location: None,
            meeting_link: None,
            status: MeetingStatus::Scheduled,
            repeat_frequency: RepeatFrequency::None,
            participants: Vec::new(),
            created_at: at(8),
            updated_at: at(8),
        }
    }

    #[test]
    fn moving_the_start_past_the_stored_end_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_meeting_by_id()
            .returning(|id, _| Ok(Some(meeting(id))));
        repo.expect_update_meeting().times(0);

        let form = UpdateMeetingForm {
            starts_at: Some(at(12)),
            ..UpdateMeetingForm::default()
        };
        let result = update_meeting(&repo, &user(&["crm"]), 3, form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn inverted_listing_range_is_rejected() {
        let repo = MockRepository::new();
        let form = MeetingRangeQueryForm {
            from: Some(at(12)),
            to: Some(at(9)),
        };
        let result = list_meetings(&repo, &user(&["crm"]), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
