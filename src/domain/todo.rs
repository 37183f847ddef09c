use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::types::{HubId, ManagerId, RichText, Title, TodoId};

string_enum!(
    TodoStatus {
        Todo => "Todo",
        InProgress => "InProgress",
        Done => "Done",
    }
);

string_enum!(
    TodoPriority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
);

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    #[serde(skip)]
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub title: Title,
    pub description: Option<RichText>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTodo {
    pub hub_id: HubId,
    pub owner_id: ManagerId,
    pub title: Title,
    pub description: Option<RichText>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<NaiveDate>,
}

impl NewTodo {
    #[must_use]
    pub fn new(hub_id: HubId, owner_id: ManagerId, title: Title) -> Self {
        Self {
            hub_id,
            owner_id,
            title,
            description: None,
            status: TodoStatus::Todo,
            priority: TodoPriority::Medium,
            due_date: None,
        }
    }
}

/// Partial update shared by single and bulk edits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoUpdate {
    pub title: Option<Title>,
    pub description: Option<RichText>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<NaiveDate>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
