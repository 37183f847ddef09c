use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::todo::{NewTodo, TodoPriority, TodoStatus, TodoUpdate};
use crate::domain::types::{HubId, ManagerId, RichText, Title, TodoId};
use crate::forms::{FormError, optional, parse_optional_id};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/admin/todos`.
pub struct CreateTodoForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `PATCH /api/admin/todos/{id}` and the `updates` of a bulk update.
pub struct UpdateTodoForm {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteTodosForm {
    pub ids: Vec<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkUpdateTodosForm {
    pub ids: Vec<i32>,
    #[validate(nested)]
    pub updates: UpdateTodoForm,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListQueryForm {
    pub owner_id: Option<String>,
}

impl CreateTodoForm {
    pub fn into_domain(self, hub_id: HubId, owner_id: ManagerId) -> Result<NewTodo, FormError> {
        self.validate()?;

        let mut todo = NewTodo::new(hub_id, owner_id, Title::new(self.title)?);
        todo.description = optional(self.description, RichText::new)?;
        if let Some(status) = self.status {
            todo.status = status;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        todo.due_date = self.due_date;
        Ok(todo)
    }
}

impl TryFrom<UpdateTodoForm> for TodoUpdate {
    type Error = FormError;

    fn try_from(form: UpdateTodoForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            title: optional(form.title, Title::new)?,
            description: optional(form.description, RichText::new)?,
            status: form.status,
            priority: form.priority,
            due_date: form.due_date,
        })
    }
}

/// Converts raw ids in request order, rejecting an empty selection.
/// Every id, repeated ones included, becomes its own operation.
fn todo_ids(raw: &[i32]) -> Result<Vec<TodoId>, FormError> {
    if raw.is_empty() {
        return Err(FormError::EmptySelection);
    }
    raw.iter()
        .map(|id| TodoId::new(*id).map_err(FormError::from))
        .collect()
}

impl BulkDeleteTodosForm {
    pub fn ids(&self) -> Result<Vec<TodoId>, FormError> {
        todo_ids(&self.ids)
    }
}

impl BulkUpdateTodosForm {
    pub fn into_parts(self) -> Result<(Vec<TodoId>, TodoUpdate), FormError> {
        self.validate()?;
        let ids = todo_ids(&self.ids)?;
        let update = TodoUpdate::try_from(self.updates)?;
        Ok((ids, update))
    }
}

impl TodoListQueryForm {
    pub fn owner_id(&self) -> Result<Option<ManagerId>, FormError> {
        parse_optional_id(self.owner_id.as_deref(), "ownerId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_todo_uses_defaults() {
        let form: CreateTodoForm = serde_json::from_str(r#"{"title":"Call Acme"}"#).unwrap();
        let todo = form
            .into_domain(HubId::new(1).unwrap(), ManagerId::new(4).unwrap())
            .unwrap();
        assert_eq!(todo.status, TodoStatus::Todo);
        assert_eq!(todo.priority, TodoPriority::Medium);
    }

    #[test]
    fn bulk_update_parses_ids_and_updates() {
        let form: BulkUpdateTodosForm =
            serde_json::from_str(r#"{"ids":[3,1,3],"updates":{"status":"Done"}}"#).unwrap();
        let (ids, update) = form.into_parts().unwrap();
        assert_eq!(
            ids,
            vec![
                TodoId::new(3).unwrap(),
                TodoId::new(1).unwrap(),
                TodoId::new(3).unwrap()
            ]
        );
        assert_eq!(update.status, Some(TodoStatus::Done));
        assert!(update.title.is_none());
    }

    #[test]
    fn bulk_delete_requires_ids() {
        let form = BulkDeleteTodosForm { ids: vec![] };
        assert!(matches!(form.ids(), Err(FormError::EmptySelection)));
        let form = BulkDeleteTodosForm { ids: vec![0] };
        assert!(matches!(form.ids(), Err(FormError::TypeConstraint(_))));
    }
}
