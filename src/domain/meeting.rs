use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    HubId, ManagerId, MeetingId, RichText, Title, TypeConstraintError, WebUrl,
};

string_enum!(
    MeetingStatus {
        Scheduled => "Scheduled",
        Confirmed => "Confirmed",
        Cancelled => "Cancelled",
    }
);

string_enum!(
    /// How often a meeting recurs.
    RepeatFrequency {
        None => "none",
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
);

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub title: Title,
    pub description: Option<RichText>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: Option<String>,
    pub meeting_link: Option<WebUrl>,
    pub status: MeetingStatus,
    pub repeat_frequency: RepeatFrequency,
    pub participants: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMeeting {
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub title: Title,
    pub description: Option<RichText>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: Option<String>,
    pub meeting_link: Option<WebUrl>,
    pub status: MeetingStatus,
    pub repeat_frequency: RepeatFrequency,
    pub participants: Vec<String>,
}

impl NewMeeting {
    /// Creates a scheduled, non-repeating meeting; the end must follow the start.
    pub fn try_new(
        hub_id: HubId,
        owner_id: ManagerId,
        title: Title,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        ensure_interval(starts_at, ends_at)?;
        Ok(Self {
            hub_id,
            owner_id,
            title,
            description: None,
            starts_at,
            ends_at,
            location: None,
            meeting_link: None,
            status: MeetingStatus::Scheduled,
            repeat_frequency: RepeatFrequency::None,
            participants: Vec::new(),
        })
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeetingUpdate {
    pub title: Option<Title>,
    pub description: Option<RichText>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub meeting_link: Option<WebUrl>,
    pub status: Option<MeetingStatus>,
    pub repeat_frequency: Option<RepeatFrequency>,
    pub participants: Option<Vec<String>>,
}

impl MeetingUpdate {
    /// Checks that applying this update to `current` keeps a valid interval.
    pub fn validate_against(&self, current: &Meeting) -> Result<(), TypeConstraintError> {
        ensure_interval(
            self.starts_at.unwrap_or(current.starts_at),
            self.ends_at.unwrap_or(current.ends_at),
        )
    }
}

fn ensure_interval(starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Result<(), TypeConstraintError> {
    if ends_at > starts_at {
        Ok(())
    } else {
        Err(TypeConstraintError::InvalidValue(
            "meeting must end after it starts".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn ids() -> (HubId, ManagerId) {
        (HubId::new(1).unwrap(), ManagerId::new(1).unwrap())
    }

    #[test]
    fn meeting_must_end_after_start() {
        let (hub, owner) = ids();
        let title = Title::new("Kickoff").unwrap();
        assert!(NewMeeting::try_new(hub, owner, title.clone(), at(10), at(10)).is_err());
        assert!(NewMeeting::try_new(hub, owner, title.clone(), at(11), at(10)).is_err());
        let meeting = NewMeeting::try_new(hub, owner, title, at(10), at(11)).unwrap();
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(meeting.repeat_frequency, RepeatFrequency::None);
    }

    #[test]
    fn repeat_frequency_uses_lowercase_names() {
        assert_eq!(RepeatFrequency::Weekly.as_str(), "weekly");
        assert_eq!("Monthly".parse::<RepeatFrequency>(), Ok(RepeatFrequency::Monthly));
    }

    #[test]
    fn update_is_checked_against_stored_interval() {
        let (hub, owner) = ids();
        let meeting = Meeting {
            id: MeetingId::new(1).unwrap(),
            hub_id: hub,
            owner_id: owner,
            title: Title::new("Review").unwrap(),
            description: None,
            starts_at: at(9),
            ends_at: at(10),
            location: None,
            meeting_link: None,
            status: MeetingStatus::Confirmed,
            repeat_frequency: RepeatFrequency::None,
            participants: vec![],
            created_at: at(8),
            updated_at: at(8),
        };
        let bad = MeetingUpdate {
            starts_at: Some(at(12)),
            ..MeetingUpdate::default()
        };
        assert!(bad.validate_against(&meeting).is_err());
        let good = MeetingUpdate {
            starts_at: Some(at(9)),
            ends_at: Some(at(12)),
            ..MeetingUpdate::default()
        };
        assert!(good.validate_against(&meeting).is_ok());
    }
}
