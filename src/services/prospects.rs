use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::prospect::Prospect;
use crate::forms::prospects::CreateProspectForm;
use crate::repository::{ActivityWriter, ManagerWriter, ProspectReader, ProspectWriter};
use crate::services::{ServiceResult, current_manager, ensure_role, hub_of, record};

pub fn list_prospects<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Prospect>>
where
    R: ProspectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    Ok(repo.list_prospects(hub_of(user)?)?)
}

/// Registers a prospect; it counts towards "new deals" from now on.
pub fn create_prospect<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateProspectForm,
) -> ServiceResult<Prospect>
where
    R: ProspectWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_prospect = form.into_domain(manager.hub_id, manager.id)?;

    let prospect = repo.create_prospect(&new_prospect)?;
    record(repo, &manager, EntityType::Prospect, prospect.id, ActivityAction::Created);
    Ok(prospect)
}
