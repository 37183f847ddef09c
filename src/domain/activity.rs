use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::manager::Manager;
use crate::domain::types::{ActivityId, HubId, ManagerId};

string_enum!(
    /// Kind of record an activity refers to.
    EntityType {
        Company => "Company",
        Contact => "Contact",
        Deal => "Deal",
        Prospect => "Prospect",
        Meeting => "Meeting",
        Todo => "Todo",
    }
);

string_enum!(
    ActivityAction {
        Created => "Created",
        Updated => "Updated",
        Deleted => "Deleted",
        Imported => "Imported",
    }
);

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub manager_id: ManagerId,
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub action: ActivityAction,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewActivity {
    pub hub_id: HubId,
    pub manager_id: ManagerId,
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub action: ActivityAction,
}

impl NewActivity {
    #[must_use]
    pub fn new(
        manager: &Manager,
        entity_type: EntityType,
        entity_id: impl Into<i32>,
        action: ActivityAction,
    ) -> Self {
        Self {
            hub_id: manager.hub_id,
            manager_id: manager.id,
            entity_type,
            entity_id: entity_id.into(),
            action,
        }
    }
}

/// Activity joined with the manager who performed it.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub performed_by: Manager,
}
