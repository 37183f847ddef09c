use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{EmailAddress, HubId, ManagerId, ManagerName, TypeConstraintError};

/// Dashboard user owning records and performing activities.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Manager {
    pub id: ManagerId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub name: ManagerName,
    pub email: EmailAddress,
}

impl Manager {
    pub fn try_new(
        id: i32,
        hub_id: i32,
        name: String,
        email: String,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: ManagerId::new(id)?,
            hub_id: HubId::new(hub_id)?,
            name: ManagerName::new(name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewManager {
    pub hub_id: HubId,
    pub name: ManagerName,
    pub email: EmailAddress,
}

impl TryFrom<&AuthenticatedUser> for NewManager {
    type Error = TypeConstraintError;

    fn try_from(user: &AuthenticatedUser) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(user.email.as_str())?;
        // Providers may omit the display name; fall back to the address.
        let name = ManagerName::new(user.name.as_str())
            .or_else(|_| ManagerName::new(email.as_str()))?;
        Ok(Self {
            hub_id: HubId::new(user.hub_id)?,
            name,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".to_string(),
            email: "Owner@Example.com".to_string(),
            hub_id: 3,
            name: name.to_string(),
            roles: vec!["crm".to_string()],
            exp: 0,
        }
    }

    #[test]
    fn new_manager_from_user_normalizes_email() {
        let manager = NewManager::try_from(&user("Owner")).unwrap();
        assert_eq!(manager.hub_id.get(), 3);
        assert_eq!(manager.email.as_str(), "owner@example.com");
        assert_eq!(manager.name.as_str(), "Owner");
    }

    #[test]
    fn blank_name_falls_back_to_email() {
        let manager = NewManager::try_from(&user("  ")).unwrap();
        assert_eq!(manager.name.as_str(), "owner@example.com");
    }
}
