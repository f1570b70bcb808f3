use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared_types::{
    Contact, CreateContactRequest, CreateDealRequest, CreateTaskRequest, Deal, ErrorResponse,
    MessageResponse, StatusResponse, Task, UpdateContactRequest, UpdateDealRequest,
    UpdateTaskRequest,
};

use crate::error::ClientError;

pub type ApiResult<T> = Result<T, ClientError>;

/// The CRM HTTP API as seen by the views
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>>;
    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact>;
    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact>;
    async fn delete_contact(&self, id: i64) -> ApiResult<()>;

    async fn list_deals(&self) -> ApiResult<Vec<Deal>>;
    async fn create_deal(&self, request: &CreateDealRequest) -> ApiResult<Deal>;
    async fn update_deal(&self, id: i64, request: &UpdateDealRequest) -> ApiResult<Deal>;
    async fn delete_deal(&self, id: i64) -> ApiResult<Deal>;

    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;
    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task>;
    async fn update_task(&self, id: i64, request: &UpdateTaskRequest) -> ApiResult<Task>;
    async fn delete_task(&self, id: i64) -> ApiResult<()>;
}

pub struct HttpCrmApi {
    client: Client,
    base_url: String,
}

impl HttpCrmApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {}", status.as_u16(), response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error);
            return Err(ClientError::Http { status, message });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CrmApi for HttpCrmApi {
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        self.send(self.client.get(self.url("/api/contacts"))).await
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact> {
        self.send(self.client.post(self.url("/api/contacts")).json(request))
            .await
    }

    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact> {
        let url = self.url(&format!("/api/contacts/{}", id));
        self.send(self.client.put(url).json(request)).await
    }

    async fn delete_contact(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/contacts/{}", id));
        let _: StatusResponse = self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_deals(&self) -> ApiResult<Vec<Deal>> {
        self.send(self.client.get(self.url("/api/deals"))).await
    }

    async fn create_deal(&self, request: &CreateDealRequest) -> ApiResult<Deal> {
        self.send(self.client.post(self.url("/api/deals")).json(request))
            .await
    }

    async fn update_deal(&self, id: i64, request: &UpdateDealRequest) -> ApiResult<Deal> {
        let url = self.url(&format!("/api/deals/{}", id));
        self.send(self.client.put(url).json(request)).await
    }

    async fn delete_deal(&self, id: i64) -> ApiResult<Deal> {
        let url = self.url(&format!("/api/deals/{}", id));
        self.send(self.client.delete(url)).await
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.send(self.client.get(self.url("/api/tasks"))).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
        self.send(self.client.post(self.url("/api/tasks")).json(request))
            .await
    }

    async fn update_task(&self, id: i64, request: &UpdateTaskRequest) -> ApiResult<Task> {
        let url = self.url(&format!("/api/tasks/{}", id));
        self.send(self.client.put(url).json(request)).await
    }

    async fn delete_task(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/tasks/{}", id));
        let _: MessageResponse = self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
