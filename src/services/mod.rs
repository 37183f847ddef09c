//! Business workflows generic over the repository traits.
//!
//! Services check roles, turn payloads into domain values, call the
//! repository and record activities; routes only translate the outcome.

use std::sync::Arc;

use actix_web::web;
use thiserror::Error;

use crate::domain::activity::{ActivityAction, EntityType, NewActivity};
use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::manager::{Manager, NewManager};
use crate::domain::types::{HubId, TypeConstraintError};
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::repository::{ActivityWriter, ManagerWriter};
use crate::spreadsheet::reader::{SheetFormat, read_rows};
use crate::spreadsheet::{Row, SpreadsheetError};

pub mod activity;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod meetings;
pub mod prospects;
pub mod stats;
pub mod todos;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    /// Invalid input; the message is shown to the caller.
    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<SpreadsheetError> for ServiceError {
    fn from(err: SpreadsheetError) -> Self {
        match err {
            SpreadsheetError::Write(e) => ServiceError::Internal(e.to_string()),
            SpreadsheetError::NoValidRows { entity, warnings } if !warnings.is_empty() => {
                ServiceError::Form(format!(
                    "No valid {entity} data found in the file. {}",
                    warnings.join("; ")
                ))
            }
            other => ServiceError::Form(other.to_string()),
        }
    }
}

/// Fails with [`ServiceError::Forbidden`] unless `user` holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// A token without a valid hub cannot be scoped to any tenant.
pub(crate) fn hub_of(user: &AuthenticatedUser) -> ServiceResult<HubId> {
    HubId::new(user.hub_id).map_err(|_| ServiceError::Unauthorized)
}

/// Upserts the manager row of the current user; writes are attributed to it.
pub(crate) fn current_manager<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Manager>
where
    R: ManagerWriter + ?Sized,
{
    let new_manager = NewManager::try_from(user)?;
    Ok(repo.create_or_update_manager(&new_manager)?)
}

/// Runs synchronous repository work on the blocking thread pool.
pub(crate) async fn run_blocking<R, T, F>(repo: &Arc<R>, work: F) -> ServiceResult<T>
where
    R: Send + Sync + 'static + ?Sized,
    T: Send + 'static,
    F: FnOnce(&R) -> ServiceResult<T> + Send + 'static,
{
    let repo = Arc::clone(repo);
    web::block(move || work(repo.as_ref()))
        .await
        .map_err(|e| ServiceError::Internal(format!("blocking task failed: {e}")))?
}

/// Flattens an uploaded workbook into rows, picking the reader by extension.
pub(crate) fn read_upload(file_name: &str, bytes: &[u8]) -> ServiceResult<Vec<Row>> {
    let format = SheetFormat::from_file_name(file_name)?;
    Ok(read_rows(bytes, format)?)
}

/// Records an activity; failures are logged and never fail the write itself.
pub(crate) fn record<R>(
    repo: &R,
    manager: &Manager,
    entity_type: EntityType,
    entity_id: impl Into<i32>,
    action: ActivityAction,
) where
    R: ActivityWriter + ?Sized,
{
    let activity = NewActivity::new(manager, entity_type, entity_id, action);
    if let Err(err) = repo.record_activity(&activity) {
        log::warn!("Failed to record {action} activity for {entity_type}: {err}");
    }
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod test_support {
    use crate::domain::auth::AuthenticatedUser;
    use crate::domain::manager::Manager;

    pub fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "owner@example.com".to_string(),
            hub_id: 1,
            name: "Owner".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            exp: usize::MAX,
        }
    }

    pub fn manager() -> Manager {
        Manager::try_new(5, 1, "Owner".to_string(), "owner@example.com".to_string()).unwrap()
    }
}
