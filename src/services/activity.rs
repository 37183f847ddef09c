use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::ActivityEntry;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::activity::ActivityQueryForm;
use crate::repository::ActivityReader;
use crate::services::{ServiceResult, ensure_role, hub_of};

/// Most recent activities of the hub, newest first.
pub fn recent_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ActivityQueryForm,
) -> ServiceResult<Vec<ActivityEntry>>
where
    R: ActivityReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    Ok(repo.list_recent_activity(hub_of(user)?, form.limit())?)
}
