use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        meeting::{Meeting, MeetingUpdate, NewMeeting},
        types::{HubId, MeetingId},
    },
    models::meeting::{
        Meeting as DbMeeting, NewMeeting as DbNewMeeting, UpdateMeeting as DbUpdateMeeting,
    },
    repository::{
        DieselRepository, MeetingListQuery, MeetingReader, MeetingWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl MeetingReader for DieselRepository {
    fn get_meeting_by_id(
        &self,
        id: MeetingId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Meeting>> {
        use crate::schema::meetings;

        let mut conn = self.conn()?;
        let db_meeting = meetings::table
            .filter(meetings::id.eq(id.get()))
            .filter(meetings::hub_id.eq(hub_id.get()))
            .first::<DbMeeting>(&mut conn)
            .optional()?;

        db_meeting
            .map(Meeting::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_meetings(&self, query: MeetingListQuery) -> RepositoryResult<Vec<Meeting>> {
        use crate::schema::meetings;

        let mut conn = self.conn()?;
        let mut items = meetings::table
            .filter(meetings::hub_id.eq(query.hub_id.get()))
            .into_boxed();

        // overlap with [from, to): starts before `to` and ends after `from`
        if let Some(to) = query.to {
            items = items.filter(meetings::starts_at.lt(to));
        }
        if let Some(from) = query.from {
            items = items.filter(meetings::ends_at.gt(from));
        }

        items
            .order(meetings::starts_at.asc())
            .load::<DbMeeting>(&mut conn)?
            .into_iter()
            .map(|db_meeting| Meeting::try_from(db_meeting).map_err(RepositoryError::from))
            .collect()
    }
}

impl MeetingWriter for DieselRepository {
    fn create_meeting(&self, new_meeting: &NewMeeting) -> RepositoryResult<Meeting> {
        use crate::schema::meetings;

        let mut conn = self.conn()?;
        let db_new_meeting = DbNewMeeting::from_domain(new_meeting, Utc::now().naive_utc());

        let db_meeting = diesel::insert_into(meetings::table)
            .values(&db_new_meeting)
            .get_result::<DbMeeting>(&mut conn)?;

        Meeting::try_from(db_meeting).map_err(RepositoryError::from)
    }

    fn update_meeting(
        &self,
        id: MeetingId,
        hub_id: HubId,
        updates: &MeetingUpdate,
    ) -> RepositoryResult<Meeting> {
        use crate::schema::meetings;

        let mut conn = self.conn()?;
        let changeset = DbUpdateMeeting::from_domain(updates, Utc::now().naive_utc());

        let db_meeting = diesel::update(
            meetings::table
                .filter(meetings::id.eq(id.get()))
                .filter(meetings::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbMeeting>(&mut conn)?;

        Meeting::try_from(db_meeting).map_err(RepositoryError::from)
    }

    fn delete_meeting(&self, id: MeetingId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::meetings;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            meetings::table
                .filter(meetings::id.eq(id.get()))
                .filter(meetings::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
