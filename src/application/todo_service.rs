use crate::domain::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, TodoId, TodoItem, UpdateTodo};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Vec<TodoItem>;
    async fn get(&self, id: TodoId) -> Result<TodoItem, TodoError>;
    async fn create(&self, input: CreateTodo) -> Result<TodoItem, TodoError>;
    async fn toggle(&self, id: TodoId) -> Result<TodoItem, TodoError>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, TodoError>;
    async fn remove(&self, id: TodoId) -> Result<TodoItem, TodoError>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

// Rejections are routine for this API, so they only show up at debug level.
fn trace_outcome(op: &'static str, result: &Result<TodoItem, TodoError>) {
    match result {
        Ok(todo) => tracing::debug!(op, id = %todo.id, "ok"),
        Err(TodoError::NotFound(id)) => tracing::debug!(op, %id, "not found"),
        Err(TodoError::Validation(msg)) => tracing::debug!(op, reason = %msg, "rejected"),
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> Vec<TodoItem> { self.repo.list().await }

    async fn get(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let result = self.repo.get(id).await;
        trace_outcome("get", &result);
        result
    }

    async fn create(&self, input: CreateTodo) -> Result<TodoItem, TodoError> {
        let result = self.repo.create(input).await;
        match &result {
            Ok(todo) => tracing::info!(id = %todo.id, title = %todo.title, "todo created"),
            Err(_) => trace_outcome("create", &result),
        }
        result
    }

    async fn toggle(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let result = self.repo.toggle(id).await;
        trace_outcome("toggle", &result);
        result
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, TodoError> {
        let result = self.repo.update(id, input).await;
        trace_outcome("update", &result);
        result
    }

    async fn remove(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let result = self.repo.remove(id).await;
        match &result {
            Ok(todo) => tracing::info!(id = %todo.id, "todo deleted"),
            Err(_) => trace_outcome("remove", &result),
        }
        result
    }
}
