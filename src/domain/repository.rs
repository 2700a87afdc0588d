use async_trait::async_trait;

use super::error::TodoError;
use super::todo::{CreateTodo, TodoId, TodoItem, UpdateTodo};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn list(&self) -> Vec<TodoItem>;
    async fn get(&self, id: TodoId) -> Result<TodoItem, TodoError>;
    async fn create(&self, input: CreateTodo) -> Result<TodoItem, TodoError>;
    async fn toggle(&self, id: TodoId) -> Result<TodoItem, TodoError>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, TodoError>;
    async fn remove(&self, id: TodoId) -> Result<TodoItem, TodoError>;
}
