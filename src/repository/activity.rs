use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        activity::{Activity, ActivityEntry, NewActivity},
        manager::Manager,
        types::HubId,
    },
    models::{
        activity::{Activity as DbActivity, NewActivity as DbNewActivity},
        manager::Manager as DbManager,
    },
    repository::{
        ActivityReader, ActivityWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ActivityReader for DieselRepository {
    fn list_recent_activity(
        &self,
        hub_id: HubId,
        limit: i64,
    ) -> RepositoryResult<Vec<ActivityEntry>> {
        use crate::schema::{activities, managers};

        let mut conn = self.conn()?;
        let rows = activities::table
            .inner_join(managers::table)
            .filter(activities::hub_id.eq(hub_id.get()))
            .order((activities::created_at.desc(), activities::id.desc()))
            .limit(limit)
            .select((DbActivity::as_select(), DbManager::as_select()))
            .load::<(DbActivity, DbManager)>(&mut conn)?;

        rows.into_iter()
            .map(|(db_activity, db_manager)| {
                Ok(ActivityEntry {
                    activity: Activity::try_from(db_activity)?,
                    performed_by: Manager::try_from(db_manager)?,
                })
            })
            .collect::<Result<Vec<_>, crate::domain::types::TypeConstraintError>>()
            .map_err(RepositoryError::from)
    }
}

impl ActivityWriter for DieselRepository {
    fn record_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_new_activity = DbNewActivity::from_domain(activity, Utc::now().naive_utc());

        let db_activity = diesel::insert_into(activities::table)
            .values(&db_new_activity)
            .get_result::<DbActivity>(&mut conn)?;

        Activity::try_from(db_activity).map_err(RepositoryError::from)
    }
}
