use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::contact::Contact;
use crate::forms::contacts::{ContactListQueryForm, CreateContactForm};
use crate::repository::{ActivityWriter, ContactReader, ContactWriter, ManagerWriter};
use crate::services::{ServiceResult, current_manager, ensure_role, hub_of, record};

pub fn list_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ContactListQueryForm,
) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    Ok(repo.list_contacts(hub_of(user)?, form.company_id()?)?)
}

pub fn create_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_contact = form.into_domain(manager.hub_id)?;

    let contact = repo.create_contact(&new_contact)?;
    record(repo, &manager, EntityType::Contact, contact.id, ActivityAction::Created);
    Ok(contact)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::CompanyId;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::user;

    #[test]
    fn list_filters_by_company() {
        let mut repo = MockRepository::new();
        repo.expect_list_contacts()
            .withf(|_, company| *company == Some(CompanyId::new(3).unwrap()))
            .returning(|_, _| Ok(Vec::new()));

        let form = ContactListQueryForm {
            company_id: Some("3".to_string()),
        };
        assert!(list_contacts(&repo, &user(&["crm"]), form).unwrap().is_empty());
    }

    #[test]
    fn malformed_company_filter_is_rejected() {
        let repo = MockRepository::new();
        let form = ContactListQueryForm {
            company_id: Some("three".to_string()),
        };
        let result = list_contacts(&repo, &user(&["crm"]), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
