//! `reqwest` client for the JSON task backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::models::{
    CreateBody, CreateResponse, ListBody, ListResponse, ReorderBody, TaskIdBody, TaskRow,
    UpdateStatusBody, error_message,
};
use crate::config::GatewayConfig;
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskStatus},
    ports::{CreatedTask, GatewayError, GatewayResult, ListQuery, TaskGateway, TaskPage},
};

/// Task backend reached over HTTP.
///
/// Every operation is a JSON `POST` below the configured base URL. Non-2xx
/// answers become [`GatewayError::Rejected`] carrying the body's `message`.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    base_url: String,
}

impl HttpTaskGateway {
    /// Creates a gateway from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the absolute URL of `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B>(&self, path: &str, body: &B) -> GatewayResult<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%url, "sending task backend request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text);
        warn!(%url, status = status.as_u16(), ?message, "task backend rejected request");
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.post(path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(err.to_string())
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list(&self, query: &ListQuery) -> GatewayResult<TaskPage> {
        let body = ListBody {
            page: query.page,
            page_size: query.page_size,
            status: query.status.map(TaskStatus::value),
            search: query.search.clone(),
        };
        let response: ListResponse = self.post_json("list", &body).await?;
        response.into_page()
    }

    async fn create(&self, draft: &TaskDraft) -> GatewayResult<CreatedTask> {
        let response: CreateResponse = self.post_json("create", &CreateBody::from(draft)).await?;
        Ok(response.into())
    }

    async fn update(&self, task: &Task) -> GatewayResult<()> {
        self.post("update", &TaskRow::from(task)).await?;
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()> {
        let body = TaskIdBody {
            task_id: task_id.into(),
        };
        self.post("delete", &body).await?;
        Ok(())
    }

    async fn update_status(&self, task_id: &TaskId, status: TaskStatus) -> GatewayResult<()> {
        let body = UpdateStatusBody {
            task_id: task_id.into(),
            status: status.value(),
        };
        self.post("update-status", &body).await?;
        Ok(())
    }

    async fn reorder(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
        order_index: u32,
    ) -> GatewayResult<()> {
        let body = ReorderBody {
            task_id: task_id.into(),
            new_status: status.value(),
            new_index: order_index,
        };
        self.post("reorder-tasks-and-status", &body).await?;
        Ok(())
    }
}
