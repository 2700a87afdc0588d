use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    error::TodoError,
    repository::TodoRepository,
    todo::{validate_title, CreateTodo, TodoId, TodoItem, UpdateTodo},
};

#[derive(Debug)]
struct Collection {
    items: Vec<TodoItem>,
    next_id: u64,
}

impl Default for Collection {
    fn default() -> Self { Self { items: Vec::new(), next_id: 1 } }
}

impl Collection {
    fn position(&self, id: TodoId) -> Result<usize, TodoError> {
        self.items.iter().position(|t| t.id == id).ok_or(TodoError::NotFound(id))
    }
}

/// Process-lifetime todo collection. Clones share the same collection; a
/// fresh `TodoStore::new()` starts empty with ids from 1.
///
/// Every operation holds the lock for its whole read-modify-write, so
/// mutations never interleave.
#[derive(Clone, Default)]
pub struct TodoStore {
    inner: Arc<Mutex<Collection>>,
}

impl TodoStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn list(&self) -> Vec<TodoItem> { self.inner.lock().await.items.clone() }

    async fn get(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let col = self.inner.lock().await;
        let idx = col.position(id)?;
        Ok(col.items[idx].clone())
    }

    async fn create(&self, input: CreateTodo) -> Result<TodoItem, TodoError> {
        let title = validate_title(input.title.as_deref())?;
        let mut col = self.inner.lock().await;
        let id = TodoId(col.next_id);
        col.next_id += 1;
        let todo = TodoItem { id, title, completed: false, created_at: Utc::now() };
        col.items.push(todo.clone());
        Ok(todo)
    }

    async fn toggle(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let mut col = self.inner.lock().await;
        let idx = col.position(id)?;
        let todo = &mut col.items[idx];
        todo.completed = !todo.completed;
        Ok(todo.clone())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, TodoError> {
        // Validate before touching the item so a bad title leaves it unchanged.
        let title = match input.title.as_deref() {
            Some(t) => Some(validate_title(Some(t))?),
            None => None,
        };
        let mut col = self.inner.lock().await;
        let idx = col.position(id)?;
        let todo = &mut col.items[idx];
        if let Some(t) = title { todo.title = t; }
        if let Some(c) = input.completed { todo.completed = c; }
        Ok(todo.clone())
    }

    async fn remove(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let mut col = self.inner.lock().await;
        let idx = col.position(id)?;
        Ok(col.items.remove(idx))
    }
}
