use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::meeting::{
    Meeting as DomainMeeting, MeetingStatus, MeetingUpdate as DomainMeetingUpdate,
    NewMeeting as DomainNewMeeting, RepeatFrequency,
};
use crate::domain::types::{
    HubId, ManagerId, MeetingId, RichText, Title, TypeConstraintError, WebUrl, join_list,
    split_list,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::meetings)]
pub struct Meeting {
    pub id: i32,
    pub hub_id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub status: String,
    pub repeat_frequency: String,
    pub participants: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meetings)]
pub struct NewMeeting<'a> {
    pub hub_id: i32,
    pub owner_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: Option<&'a str>,
    pub meeting_link: Option<&'a str>,
    pub status: &'static str,
    pub repeat_frequency: &'static str,
    pub participants: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::meetings)]
pub struct UpdateMeeting<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub location: Option<&'a str>,
    pub meeting_link: Option<&'a str>,
    pub status: Option<&'static str>,
    pub repeat_frequency: Option<&'static str>,
    pub participants: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Meeting> for DomainMeeting {
    type Error = TypeConstraintError;

    fn try_from(meeting: Meeting) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MeetingId::new(meeting.id)?,
            hub_id: HubId::new(meeting.hub_id)?,
            owner_id: ManagerId::new(meeting.owner_id)?,
            title: Title::new(meeting.title)?,
            description: meeting.description.map(RichText::new).transpose()?,
            starts_at: meeting.starts_at,
            ends_at: meeting.ends_at,
            location: meeting.location,
            meeting_link: meeting.meeting_link.map(WebUrl::new).transpose()?,
            status: meeting.status.parse::<MeetingStatus>()?,
            repeat_frequency: meeting.repeat_frequency.parse::<RepeatFrequency>()?,
            participants: split_list(&meeting.participants),
            created_at: meeting.created_at,
            updated_at: meeting.updated_at,
        })
    }
}

impl<'a> NewMeeting<'a> {
    pub fn from_domain(meeting: &'a DomainNewMeeting, now: NaiveDateTime) -> Self {
        Self {
            hub_id: meeting.hub_id.get(),
            owner_id: meeting.owner_id.get(),
            title: meeting.title.as_str(),
            description: meeting.description.as_ref().map(RichText::as_str),
            starts_at: meeting.starts_at,
            ends_at: meeting.ends_at,
            location: meeting.location.as_deref(),
            meeting_link: meeting.meeting_link.as_ref().map(WebUrl::as_str),
            status: meeting.status.as_str(),
            repeat_frequency: meeting.repeat_frequency.as_str(),
            participants: join_list(&meeting.participants),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateMeeting<'a> {
    pub fn from_domain(update: &'a DomainMeetingUpdate, now: NaiveDateTime) -> Self {
        Self {
            title: update.title.as_deref(),
            description: update.description.as_ref().map(RichText::as_str),
            starts_at: update.starts_at,
            ends_at: update.ends_at,
            location: update.location.as_deref(),
            meeting_link: update.meeting_link.as_ref().map(WebUrl::as_str),
            status: update.status.map(MeetingStatus::as_str),
            repeat_frequency: update.repeat_frequency.map(RepeatFrequency::as_str),
            participants: update.participants.as_deref().map(join_list),
            updated_at: now,
        }
    }
}
