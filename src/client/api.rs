use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::todo::{CreateTodo, TodoId, TodoItem, UpdateTodo};
use crate::http::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    NotFound(String),
    /// Any other non-2xx answer, with the server's `error` message when it sent one.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Everything the list view needs from the server.
#[async_trait]
pub trait TodoBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<TodoItem>, ClientError>;
    async fn create(&self, title: &str) -> Result<TodoItem, ClientError>;
    async fn toggle(&self, id: TodoId) -> Result<TodoItem, ClientError>;
    async fn update(&self, id: TodoId, fields: &UpdateTodo) -> Result<TodoItem, ClientError>;
    async fn remove(&self, id: TodoId) -> Result<TodoItem, ClientError>;
}

/// reqwest client for the `/api/todos` contract. No retries, and no timeout
/// beyond the transport's own.
#[derive(Debug, Clone)]
pub struct TodoApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoApiClient {
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn collection(&self) -> String { format!("{}/api/todos", self.base_url) }

    fn item(&self, id: TodoId) -> String { format!("{}/api/todos/{id}", self.base_url) }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unexpected status").to_string(),
    };
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(message));
    }
    Err(ClientError::Rejected { status: status.as_u16(), message })
}

#[async_trait]
impl TodoBackend for TodoApiClient {
    async fn list(&self) -> Result<Vec<TodoItem>, ClientError> { send(self.http.get(self.collection())).await }

    async fn create(&self, title: &str) -> Result<TodoItem, ClientError> {
        send(self.http.post(self.collection()).json(&CreateTodo::titled(title))).await
    }

    async fn toggle(&self, id: TodoId) -> Result<TodoItem, ClientError> { send(self.http.patch(self.item(id))).await }

    async fn update(&self, id: TodoId, fields: &UpdateTodo) -> Result<TodoItem, ClientError> {
        send(self.http.put(self.item(id)).json(fields)).await
    }

    async fn remove(&self, id: TodoId) -> Result<TodoItem, ClientError> { send(self.http.delete(self.item(id))).await }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slashes() {
        let client = TodoApiClient::new("http://localhost:3001//");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.collection(), "http://localhost:3001/api/todos");
        assert_eq!(client.item(TodoId(12)), "http://localhost:3001/api/todos/12");
    }

    #[test]
    fn rejected_error_mentions_status_and_message() {
        let err = ClientError::Rejected { status: 400, message: "Title is required".into() };
        assert_eq!(err.to_string(), "HTTP 400: Title is required");
    }
}
