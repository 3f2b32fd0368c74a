//! `reqwest`-backed implementation of the remote task store.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use super::wire::{ErrorBody, TaskDto, TaskStatusDto, UpdateTaskStatusBody, WireError};
use crate::{
    board::{
        domain::{BoardColumn, BoardTask, ColumnId, ProjectId, TaskId},
        ports::{RemoteStoreError, RemoteStoreResult, RemoteTaskStore},
    },
    config::ApiConfig,
};

/// Remote task store speaking to the project-management REST API.
///
/// The client keeps a cookie jar so that a session cookie obtained by the
/// host application authenticates every request.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    api: ApiConfig,
}

impl HttpTaskStore {
    /// Builds a store for the configured API.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(api: ApiConfig) -> RemoteStoreResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(api.request_timeout())
            .build()
            .map_err(RemoteStoreError::transport)?;
        Ok(Self { client, api })
    }

    /// Wraps an existing client, for hosts that share one connection pool.
    #[must_use]
    pub const fn with_client(client: Client, api: ApiConfig) -> Self {
        Self { client, api }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RemoteStoreResult<T> {
        let url = self.api.endpoint(path);
        tracing::debug!(%url, "fetching board resource");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(RemoteStoreError::transport)?;
        let bytes = ensure_success(response, None)
            .await?
            .bytes()
            .await
            .map_err(RemoteStoreError::transport)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| RemoteStoreError::InvalidPayload(err.to_string()))
    }
}

/// Maps non-success statuses to port errors.
async fn ensure_success(
    response: Response,
    task_id: Option<TaskId>,
) -> RemoteStoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(RemoteStoreError::Unauthorized {
            status: status.as_u16(),
        });
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, task_id) {
        return Err(RemoteStoreError::NotFound(id));
    }
    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
        .and_then(|body| body.message);
    Err(RemoteStoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Decodes and validates one task record.
fn decode_task(record: serde_json::Value) -> Result<BoardTask, WireError> {
    let dto = TaskDto::deserialize(record).map_err(|err| WireError::Malformed(err.to_string()))?;
    BoardTask::try_from(dto)
}

#[async_trait]
impl RemoteTaskStore for HttpTaskStore {
    async fn fetch_columns(&self) -> RemoteStoreResult<Vec<BoardColumn>> {
        let dtos: Vec<TaskStatusDto> = self.get_json("task-statuses").await?;
        dtos.into_iter()
            .map(|dto| {
                BoardColumn::try_from(dto)
                    .map_err(|err| RemoteStoreError::InvalidPayload(err.to_string()))
            })
            .collect()
    }

    async fn fetch_tasks(&self, project_id: ProjectId) -> RemoteStoreResult<Vec<BoardTask>> {
        let records: Vec<serde_json::Value> = self
            .get_json(&format!("projects/{project_id}/tasks"))
            .await?;
        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            let raw_id = record.get("id").and_then(serde_json::Value::as_i64);
            match decode_task(record) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    tracing::warn!(task_id = ?raw_id, error = %err, "skipping malformed task record");
                }
            }
        }
        Ok(tasks)
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status_id: ColumnId,
    ) -> RemoteStoreResult<()> {
        let url = self.api.endpoint(&format!("tasks/{task_id}"));
        tracing::debug!(%url, %task_id, %status_id, "sending task status update");
        let response = self
            .client
            .put(&url)
            .json(&UpdateTaskStatusBody::from(status_id))
            .send()
            .await
            .map_err(RemoteStoreError::transport)?;
        ensure_success(response, Some(task_id)).await?;
        Ok(())
    }
}
