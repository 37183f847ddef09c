use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{
    Activity as DomainActivity, ActivityAction, EntityType, NewActivity as DomainNewActivity,
};
use crate::domain::types::{ActivityId, HubId, ManagerId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activities)]
pub struct Activity {
    pub id: i32,
    pub hub_id: i32,
    pub manager_id: i32,
    pub entity_type: String,
    pub entity_id: i32,
    pub action: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity {
    pub hub_id: i32,
    pub manager_id: i32,
    pub entity_type: &'static str,
    pub entity_id: i32,
    pub action: &'static str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::new(activity.id)?,
            hub_id: HubId::new(activity.hub_id)?,
            manager_id: ManagerId::new(activity.manager_id)?,
            entity_type: activity.entity_type.parse::<EntityType>()?,
            entity_id: activity.entity_id,
            action: activity.action.parse::<ActivityAction>()?,
            created_at: activity.created_at,
        })
    }
}

impl NewActivity {
    pub fn from_domain(activity: &DomainNewActivity, now: NaiveDateTime) -> Self {
        Self {
            hub_id: activity.hub_id.get(),
            manager_id: activity.manager_id.get(),
            entity_type: activity.entity_type.as_str(),
            entity_id: activity.entity_id,
            action: activity.action.as_str(),
            created_at: now,
        }
    }
}
