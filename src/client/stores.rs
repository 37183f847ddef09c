//! Local state containers over [`AdminApi`].
//!
//! Each operation reaches the server first; the local list changes only
//! for the records the server confirmed. A failure is kept as a
//! human-readable string in `error`.

use std::collections::HashSet;

use crate::bulk::{BulkOutcome, fan_out};
use crate::client::{
    AdminApi, ClientResult, CompanyDraft, CompanyPatch, CompanyRecord, TodoDraft, TodoPatch,
    TodoRecord,
};

fn settle<T>(error: &mut Option<String>, context: &str, result: ClientResult<T>) -> ClientResult<T> {
    match &result {
        Ok(_) => *error = None,
        Err(err) => {
            log::error!("{context}: {err}");
            *error = Some(err.to_string());
        }
    }
    result
}

pub struct CompanyStore<A> {
    api: A,
    items: Vec<CompanyRecord>,
    loading: bool,
    error: Option<String>,
    selected: Option<i32>,
}

impl<A: AdminApi> CompanyStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            loading: false,
            error: None,
            selected: None,
        }
    }

    pub fn items(&self) -> &[CompanyRecord] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&CompanyRecord> {
        let id = self.selected?;
        self.items.iter().find(|company| company.id == id)
    }

    pub fn select(&mut self, id: i32) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub async fn fetch(&mut self, owner_id: Option<i32>) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.list_companies(owner_id).await;
        self.loading = false;
        let companies = settle(&mut self.error, "Failed to load companies", result)?;
        self.items = companies;
        Ok(())
    }

    pub async fn create(&mut self, draft: &CompanyDraft) -> ClientResult<CompanyRecord> {
        let result = self.api.create_company(draft).await;
        let created = settle(&mut self.error, "Failed to create company", result)?;
        self.items.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i32, patch: &CompanyPatch) -> ClientResult<CompanyRecord> {
        let result = self.api.update_company(id, patch).await;
        let updated = settle(&mut self.error, "Failed to update company", result)?;
        if let Some(slot) = self.items.iter_mut().find(|company| company.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i32) -> ClientResult<()> {
        let result = self.api.delete_company(id).await;
        settle(&mut self.error, "Failed to delete company", result)?;
        self.items.retain(|company| company.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(())
    }
}

pub struct TodoStore<A> {
    api: A,
    items: Vec<TodoRecord>,
    loading: bool,
    error: Option<String>,
}

impl<A: AdminApi> TodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[TodoRecord] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn fetch(&mut self, owner_id: Option<i32>) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.list_todos(owner_id).await;
        self.loading = false;
        let todos = settle(&mut self.error, "Failed to load todos", result)?;
        self.items = todos;
        Ok(())
    }

    pub async fn create(&mut self, draft: &TodoDraft) -> ClientResult<TodoRecord> {
        let result = self.api.create_todo(draft).await;
        let created = settle(&mut self.error, "Failed to create todo", result)?;
        self.items.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i32, patch: &TodoPatch) -> ClientResult<TodoRecord> {
        let result = self.api.update_todo(id, patch).await;
        let updated = settle(&mut self.error, "Failed to update todo", result)?;
        if let Some(slot) = self.items.iter_mut().find(|todo| todo.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i32) -> ClientResult<()> {
        let result = self.api.delete_todo(id).await;
        settle(&mut self.error, "Failed to delete todo", result)?;
        self.items.retain(|todo| todo.id != id);
        Ok(())
    }

    /// Deletes every id concurrently and drops the deleted ones locally.
    pub async fn bulk_delete(&mut self, ids: &[i32]) -> BulkOutcome {
        let api = &self.api;
        let results = fan_out(ids, |id| async move { api.delete_todo(id).await }).await;

        let deleted: HashSet<i32> = results
            .iter()
            .filter(|(_, result)| result.is_ok())
            .map(|(id, _)| *id)
            .collect();
        self.items.retain(|todo| !deleted.contains(&todo.id));

        let outcome = BulkOutcome::from_results(&results);
        self.error = Self::bulk_error("delete", &outcome);
        outcome
    }

    /// Applies `patch` to every id concurrently and keeps the server's copy
    /// of each updated record.
    pub async fn bulk_update(&mut self, ids: &[i32], patch: &TodoPatch) -> BulkOutcome {
        let api = &self.api;
        let results = fan_out(ids, |id| async move { api.update_todo(id, patch).await }).await;

        let outcome = BulkOutcome::from_results(&results);
        for (_, result) in results {
            if let Ok(updated) = result {
                if let Some(slot) = self.items.iter_mut().find(|todo| todo.id == updated.id) {
                    *slot = updated;
                }
            }
        }

        self.error = Self::bulk_error("update", &outcome);
        outcome
    }

    fn bulk_error(verb: &str, outcome: &BulkOutcome) -> Option<String> {
        if outcome.failed == 0 {
            return None;
        }
        log::error!(
            "Bulk {verb} finished with {} of {} failures",
            outcome.failed,
            outcome.requested
        );
        Some(format!("Failed to {verb} {} todos", outcome.failed))
    }
}
