use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::meeting::{MeetingStatus, MeetingUpdate, NewMeeting, RepeatFrequency};
use crate::domain::types::{HubId, ManagerId, RichText, Title, WebUrl};
use crate::forms::{FormError, non_blank, optional};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/admin/meetings`.
pub struct CreateMeetingForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub status: Option<MeetingStatus>,
    pub repeat_frequency: Option<RepeatFrequency>,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingForm {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub status: Option<MeetingStatus>,
    pub repeat_frequency: Option<RepeatFrequency>,
    pub participants: Option<Vec<String>>,
}

/// `?from=&to=` of the meeting listing.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingRangeQueryForm {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

fn clean_participants(participants: Vec<String>) -> Vec<String> {
    participants
        .into_iter()
        .filter_map(|participant| non_blank(Some(participant)))
        .collect()
}

impl CreateMeetingForm {
    pub fn into_domain(self, hub_id: HubId, owner_id: ManagerId) -> Result<NewMeeting, FormError> {
        self.validate()?;

        let mut meeting = NewMeeting::try_new(
            hub_id,
            owner_id,
            Title::new(self.title)?,
            self.starts_at,
            self.ends_at,
        )?;
        meeting.description = optional(self.description, RichText::new)?;
        meeting.location = non_blank(self.location);
        meeting.meeting_link = optional(self.meeting_link, WebUrl::new)?;
        if let Some(status) = self.status {
            meeting.status = status;
        }
        if let Some(repeat) = self.repeat_frequency {
            meeting.repeat_frequency = repeat;
        }
        meeting.participants = clean_participants(self.participants);
        Ok(meeting)
    }
}

impl TryFrom<UpdateMeetingForm> for MeetingUpdate {
    type Error = FormError;

    fn try_from(form: UpdateMeetingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            title: optional(form.title, Title::new)?,
            description: optional(form.description, RichText::new)?,
            starts_at: form.starts_at,
            ends_at: form.ends_at,
            location: non_blank(form.location),
            meeting_link: optional(form.meeting_link, WebUrl::new)?,
            status: form.status,
            repeat_frequency: form.repeat_frequency,
            participants: form.participants.map(clean_participants),
        })
    }
}

impl MeetingRangeQueryForm {
    pub fn validate_range(&self) -> Result<(), FormError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if to <= from => Err(FormError::InvalidParameter("to")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_must_end_after_start() {
        let form: CreateMeetingForm = serde_json::from_str(
            r#"{"title":"Demo","startsAt":"2025-03-10T10:00:00","endsAt":"2025-03-10T09:00:00"}"#,
        )
        .unwrap();
        assert!(matches!(
            form.into_domain(HubId::new(1).unwrap(), ManagerId::new(1).unwrap()),
            Err(FormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn meeting_form_accepts_optional_fields() {
        let form: CreateMeetingForm = serde_json::from_str(
            r#"{"title":"Demo","startsAt":"2025-03-10T10:00:00","endsAt":"2025-03-10T11:00:00",
                "repeatFrequency":"weekly","participants":["ann@example.com",""],
                "meetingLink":"https://meet.example/abc"}"#,
        )
        .unwrap();
        let meeting = form
            .into_domain(HubId::new(1).unwrap(), ManagerId::new(1).unwrap())
            .unwrap();
        assert_eq!(meeting.repeat_frequency, RepeatFrequency::Weekly);
        assert_eq!(meeting.participants, vec!["ann@example.com".to_string()]);
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
    }
}
