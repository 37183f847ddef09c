//! To-do CRUD plus the concurrent bulk delete and bulk update.

use std::sync::Arc;

use crate::SERVICE_ACCESS_ROLE;
use crate::bulk::{BulkOutcome, fan_out};
use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::todo::{Todo, TodoUpdate};
use crate::domain::types::TodoId;
use crate::forms::todos::{
    BulkDeleteTodosForm, BulkUpdateTodosForm, CreateTodoForm, TodoListQueryForm, UpdateTodoForm,
};
use crate::repository::{ActivityWriter, ManagerWriter, TodoListQuery, TodoReader, TodoWriter};
use crate::services::{
    ServiceError, ServiceResult, current_manager, ensure_role, hub_of, record, run_blocking,
};

pub fn list_todos<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: TodoListQueryForm,
) -> ServiceResult<Vec<Todo>>
where
    R: TodoReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let mut query = TodoListQuery::new(hub_of(user)?);
    if let Some(owner_id) = form.owner_id()? {
        query = query.owner(owner_id);
    }
    Ok(repo.list_todos(query)?)
}

pub fn get_todo<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Todo>
where
    R: TodoReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    repo.get_todo_by_id(TodoId::new(id)?, hub_of(user)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_todo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateTodoForm,
) -> ServiceResult<Todo>
where
    R: TodoWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_todo = form.into_domain(manager.hub_id, manager.id)?;

    let todo = repo.create_todo(&new_todo)?;
    record(repo, &manager, EntityType::Todo, todo.id, ActivityAction::Created);
    Ok(todo)
}

pub fn update_todo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateTodoForm,
) -> ServiceResult<Todo>
where
    R: TodoWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = TodoId::new(id)?;
    let updates = TodoUpdate::try_from(form)?;
    let manager = current_manager(repo, user)?;

    let todo = repo.update_todo(id, manager.hub_id, &updates)?;
    record(repo, &manager, EntityType::Todo, todo.id, ActivityAction::Updated);
    Ok(todo)
}

pub fn delete_todo<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: TodoWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = TodoId::new(id)?;
    let manager = current_manager(repo, user)?;

    repo.delete_todo(id, manager.hub_id)?;
    record(repo, &manager, EntityType::Todo, id, ActivityAction::Deleted);
    Ok(())
}

/// Deletes every selected to-do with one independent operation per id, all
/// dispatched concurrently. Failures are counted; deleted items stay deleted.
pub async fn bulk_delete_todos<R>(
    repo: Arc<R>,
    user: &AuthenticatedUser,
    form: BulkDeleteTodosForm,
) -> ServiceResult<BulkOutcome>
where
    R: TodoWriter + ManagerWriter + ActivityWriter + Send + Sync + 'static,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let ids = form.ids()?;
    let owner = user.clone();
    let manager = run_blocking(&repo, move |repo| current_manager(repo, &owner)).await?;

    let results = fan_out(&ids, |id| {
        let manager = manager.clone();
        run_blocking(&repo, move |repo| {
            repo.delete_todo(id, manager.hub_id)?;
            record(repo, &manager, EntityType::Todo, id, ActivityAction::Deleted);
            Ok(())
        })
    })
    .await;

    log_failures("delete", &results);
    Ok(BulkOutcome::from_results(&results))
}

/// Applies the same partial update to every selected to-do, concurrently and
/// independently per id.
pub async fn bulk_update_todos<R>(
    repo: Arc<R>,
    user: &AuthenticatedUser,
    form: BulkUpdateTodosForm,
) -> ServiceResult<BulkOutcome>
where
    R: TodoWriter + ManagerWriter + ActivityWriter + Send + Sync + 'static,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let (ids, updates) = form.into_parts()?;
    let owner = user.clone();
    let manager = run_blocking(&repo, move |repo| current_manager(repo, &owner)).await?;

    let results = fan_out(&ids, |id| {
        let manager = manager.clone();
        let updates = updates.clone();
        run_blocking(&repo, move |repo| {
            let todo = repo.update_todo(id, manager.hub_id, &updates)?;
            record(repo, &manager, EntityType::Todo, todo.id, ActivityAction::Updated);
            Ok(todo)
        })
    })
    .await;

    log_failures("update", &results);
    Ok(BulkOutcome::from_results(&results))
}

fn log_failures<T>(operation: &str, results: &[(TodoId, ServiceResult<T>)]) {
    for (id, result) in results {
        if let Err(err) = result {
            log::warn!("Bulk {operation} of todo {id} failed: {err}");
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::activity::Activity;
    use crate::domain::todo::{TodoPriority, TodoStatus};
    use crate::domain::types::{ActivityId, HubId, ManagerId, Title};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{manager, user};
    use chrono::Utc;

    fn todo(id: TodoId, status: TodoStatus) -> Todo {
        let now = Utc::now().naive_utc();
        Todo {
            id,
            hub_id: HubId::new(1).unwrap(),
            owner_id: ManagerId::new(5).unwrap(),
            title: Title::new("Call back").unwrap(),
            description: None,
            status,
            priority: TodoPriority::Medium,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn base_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_create_or_update_manager()
            .returning(|_| Ok(manager()));
        repo.expect_record_activity().returning(|activity| {
            Ok(Activity {
                id: ActivityId::new(1).unwrap(),
                hub_id: activity.hub_id,
                manager_id: activity.manager_id,
                entity_type: activity.entity_type,
                entity_id: activity.entity_id,
                action: activity.action,
                created_at: Utc::now().naive_utc(),
            })
        });
        repo
    }

    #[actix_web::test]
    async fn bulk_delete_counts_partial_failures() {
        let mut repo = base_repo();
        repo.expect_delete_todo().times(3).returning(|id, _| {
            if id.get() == 2 {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        });

        let form = BulkDeleteTodosForm { ids: vec![1, 2, 3] };
        let outcome = bulk_delete_todos(Arc::new(repo), &user(&["crm"]), form)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            BulkOutcome {
                requested: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }

    #[actix_web::test]
    async fn bulk_update_applies_the_same_changes_to_each_id() {
        let mut repo = base_repo();
        repo.expect_update_todo()
            .withf(|_, _, updates| updates.status == Some(TodoStatus::Done))
            .times(3)
            .returning(|id, _, _| Ok(todo(id, TodoStatus::Done)));

        let form = BulkUpdateTodosForm {
            ids: vec![4, 5, 4],
            updates: UpdateTodoForm {
                status: Some(TodoStatus::Done),
                ..UpdateTodoForm::default()
            },
        };
        let outcome = bulk_update_todos(Arc::new(repo), &user(&["crm"]), form)
            .await
            .unwrap();

        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.succeeded, 3);
        assert_eq!(outcome.failed, 0);
    }

    #[actix_web::test]
    async fn bulk_delete_rejects_an_empty_selection() {
        let repo = Arc::new(MockRepository::new());
        let form = BulkDeleteTodosForm { ids: Vec::new() };
        let result = bulk_delete_todos(repo, &user(&["crm"]), form).await;
        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "no ids provided"));
    }

    #[test]
    fn update_of_missing_todo_is_not_found() {
        let mut repo = base_repo();
        repo.expect_update_todo()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let form = UpdateTodoForm {
            status: Some(TodoStatus::InProgress),
            ..UpdateTodoForm::default()
        };
        let result = update_todo(&repo, &user(&["crm"]), 8, form);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn list_filters_by_owner() {
        let mut repo = MockRepository::new();
        repo.expect_list_todos()
            .withf(|query| query.owner_id == Some(ManagerId::new(5).unwrap()))
            .returning(|_| Ok(Vec::new()));
        let form = TodoListQueryForm {
            owner_id: Some("5".to_string()),
        };
        assert!(list_todos(&repo, &user(&["crm"]), form).unwrap().is_empty());
    }
}
