use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::client::{
    ClientError, ClientResult, CompanyDraft, CompanyPatch, CompanyRecord, TodoDraft, TodoPatch,
    TodoRecord,
};

/// Company and to-do endpoints of the admin API.
#[async_trait]
pub trait AdminApi {
    async fn list_companies(&self, owner_id: Option<i32>) -> ClientResult<Vec<CompanyRecord>>;
    async fn create_company(&self, draft: &CompanyDraft) -> ClientResult<CompanyRecord>;
    async fn update_company(&self, id: i32, patch: &CompanyPatch) -> ClientResult<CompanyRecord>;
    async fn delete_company(&self, id: i32) -> ClientResult<()>;

    async fn list_todos(&self, owner_id: Option<i32>) -> ClientResult<Vec<TodoRecord>>;
    async fn create_todo(&self, draft: &TodoDraft) -> ClientResult<TodoRecord>;
    async fn update_todo(&self, id: i32, patch: &TodoPatch) -> ClientResult<TodoRecord>;
    async fn delete_todo(&self, id: i32) -> ClientResult<()>;
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
}

/// [`AdminApi`] over HTTP, authenticated with the provider's bearer token.
#[derive(Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAdminApi {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/admin{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn owner_query(owner_id: Option<i32>) -> Vec<(&'static str, String)> {
        owner_id
            .map(|id| vec![("ownerId", id.to_string())])
            .unwrap_or_default()
    }

    async fn checked(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorPayload>().await {
            Ok(payload) => payload.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        log::warn!("Admin API answered {status}: {message}");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::checked(self.authorized(request)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::checked(self.authorized(request)).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_companies(&self, owner_id: Option<i32>) -> ClientResult<Vec<CompanyRecord>> {
        let request = self
            .client
            .get(self.url("/companies"))
            .query(&Self::owner_query(owner_id));
        self.fetch(request).await
    }

    async fn create_company(&self, draft: &CompanyDraft) -> ClientResult<CompanyRecord> {
        let request = self.client.post(self.url("/companies")).json(draft);
        self.fetch(request).await
    }

    async fn update_company(&self, id: i32, patch: &CompanyPatch) -> ClientResult<CompanyRecord> {
        let request = self
            .client
            .patch(self.url(&format!("/companies/{id}")))
            .json(patch);
        self.fetch(request).await
    }

    async fn delete_company(&self, id: i32) -> ClientResult<()> {
        let request = self.client.delete(self.url(&format!("/companies/{id}")));
        self.execute(request).await
    }

    async fn list_todos(&self, owner_id: Option<i32>) -> ClientResult<Vec<TodoRecord>> {
        let request = self
            .client
            .get(self.url("/todos"))
            .query(&Self::owner_query(owner_id));
        self.fetch(request).await
    }

    async fn create_todo(&self, draft: &TodoDraft) -> ClientResult<TodoRecord> {
        let request = self.client.post(self.url("/todos")).json(draft);
        self.fetch(request).await
    }

    async fn update_todo(&self, id: i32, patch: &TodoPatch) -> ClientResult<TodoRecord> {
        let request = self
            .client
            .patch(self.url(&format!("/todos/{id}")))
            .json(patch);
        self.fetch(request).await
    }

    async fn delete_todo(&self, id: i32) -> ClientResult<()> {
        let request = self.client.delete(self.url(&format!("/todos/{id}")));
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_under_the_admin_scope() {
        let api = HttpAdminApi::new("http://localhost:8080/");
        assert_eq!(api.url("/todos/3"), "http://localhost:8080/api/admin/todos/3");
    }

    #[test]
    fn owner_filter_is_only_sent_when_set() {
        assert!(HttpAdminApi::owner_query(None).is_empty());
        assert_eq!(
            HttpAdminApi::owner_query(Some(2)),
            vec![("ownerId", "2".to_string())]
        );
    }
}
