use crate::domain::todo::{TodoId, TodoItem, UpdateTodo};

use super::api::{ClientError, TodoBackend};
use super::cache::{QueryCache, QueryKey, QueryState};

/// "items left" / "completed" tallies. Always derived from a fetched list,
/// never maintained on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub left: usize,
    pub completed: usize,
}

impl TodoCounts {
    pub fn from_items(items: &[TodoItem]) -> Self {
        let completed = items.iter().filter(|t| t.completed).count();
        Self { left: items.len() - completed, completed }
    }
}

/// What the list view shows right now.
#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    Loading,
    Error(&'a str),
    Empty,
    List { items: &'a [TodoItem], counts: TodoCounts },
}

/// Server-backed todo list. Mutations go to the backend, then the cached
/// list is invalidated and fetched again; the local copy is never edited.
pub struct TodoView<B: TodoBackend> {
    backend: B,
    cache: QueryCache<Vec<TodoItem>>,
    notice: Option<String>,
}

impl<B: TodoBackend> TodoView<B> {
    pub fn new(backend: B) -> Self { Self { backend, cache: QueryCache::new(), notice: None } }

    pub fn backend(&self) -> &B { &self.backend }

    /// Initial fetch.
    pub async fn mount(&mut self) { self.refresh().await }

    /// Fetches the list if it was never loaded or has been invalidated.
    pub async fn refresh(&mut self) {
        if !self.cache.is_stale(QueryKey::Todos) {
            return;
        }
        self.cache.begin(QueryKey::Todos);
        let outcome = self.backend.list().await.map_err(|e| e.to_string());
        match self.cache.settle(QueryKey::Todos, outcome) {
            None => self.notice = None,
            Some(msg) => {
                tracing::warn!(error = %msg, "todo list fetch failed");
                if self.cache.data(QueryKey::Todos).is_some() {
                    self.notice = Some(format!("Could not refresh: {msg}"));
                }
            }
        }
    }

    /// Forces the next `refresh` to hit the server.
    pub fn invalidate(&mut self) { self.cache.invalidate(QueryKey::Todos) }

    pub fn screen(&self) -> Screen<'_> {
        match self.cache.state(QueryKey::Todos) {
            None | Some(QueryState::Loading) => Screen::Loading,
            Some(QueryState::Failed(msg)) => Screen::Error(msg),
            Some(QueryState::Ready(items)) if items.is_empty() => Screen::Empty,
            Some(QueryState::Ready(items)) => Screen::List { items, counts: TodoCounts::from_items(items) },
        }
    }

    pub fn items(&self) -> &[TodoItem] { self.cache.data(QueryKey::Todos).map(Vec::as_slice).unwrap_or(&[]) }

    pub fn counts(&self) -> TodoCounts { TodoCounts::from_items(self.items()) }

    /// Message from the last failed mutation or background refetch, if any.
    pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }

    pub async fn create(&mut self, title: &str) -> Result<TodoItem, ClientError> {
        let result = self.backend.create(title).await;
        self.reconcile(result).await
    }

    pub async fn toggle(&mut self, id: TodoId) -> Result<TodoItem, ClientError> {
        let result = self.backend.toggle(id).await;
        self.reconcile(result).await
    }

    pub async fn update(&mut self, id: TodoId, fields: UpdateTodo) -> Result<TodoItem, ClientError> {
        let result = self.backend.update(id, &fields).await;
        self.reconcile(result).await
    }

    pub async fn remove(&mut self, id: TodoId) -> Result<TodoItem, ClientError> {
        let result = self.backend.remove(id).await;
        self.reconcile(result).await
    }

    // Runs once the mutation has settled, whatever its outcome.
    async fn reconcile<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        self.invalidate();
        self.refresh().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "todo mutation failed");
            self.notice = Some(err.to_string());
        }
        result
    }
}
