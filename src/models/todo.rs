use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::todo::{
    NewTodo as DomainNewTodo, Todo as DomainTodo, TodoPriority, TodoStatus,
    TodoUpdate as DomainTodoUpdate,
};
use crate::domain::types::{HubId, ManagerId, RichText, Title, TodoId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::todos)]
pub struct Todo {
    pub id: i32,
    pub hub_id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::todos)]
pub struct NewTodo<'a> {
    pub hub_id: i32,
    pub owner_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'static str,
    pub priority: &'static str,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::todos)]
pub struct UpdateTodo<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<&'static str>,
    pub priority: Option<&'static str>,
    pub due_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Todo> for DomainTodo {
    type Error = TypeConstraintError;

    fn try_from(todo: Todo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TodoId::new(todo.id)?,
            hub_id: HubId::new(todo.hub_id)?,
            owner_id: ManagerId::new(todo.owner_id)?,
            title: Title::new(todo.title)?,
            description: todo.description.map(RichText::new).transpose()?,
            status: todo.status.parse::<TodoStatus>()?,
            priority: todo.priority.parse::<TodoPriority>()?,
            due_date: todo.due_date,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        })
    }
}

impl<'a> NewTodo<'a> {
    pub fn from_domain(todo: &'a DomainNewTodo, now: NaiveDateTime) -> Self {
        Self {
            hub_id: todo.hub_id.get(),
            owner_id: todo.owner_id.get(),
            title: todo.title.as_str(),
            description: todo.description.as_ref().map(RichText::as_str),
            status: todo.status.as_str(),
            priority: todo.priority.as_str(),
            due_date: todo.due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateTodo<'a> {
    pub fn from_domain(update: &'a DomainTodoUpdate, now: NaiveDateTime) -> Self {
        Self {
            title: update.title.as_deref(),
            description: update.description.as_ref().map(RichText::as_str),
            status: update.status.map(TodoStatus::as_str),
            priority: update.priority.map(TodoPriority::as_str),
            due_date: update.due_date,
            updated_at: now,
        }
    }
}
