use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Todos,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

#[derive(Debug)]
struct Entry<T> {
    state: QueryState<T>,
    stale: bool,
}

/// Keyed query results. Nothing here patches data in place: a result is
/// replaced only by the next fetch for the same key.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Entry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self { Self { entries: HashMap::new() } }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self, key: QueryKey) -> Option<&QueryState<T>> { self.entries.get(&key).map(|e| &e.state) }

    /// Last successful result for `key`, kept across a pending or failed refetch.
    pub fn data(&self, key: QueryKey) -> Option<&T> {
        match self.state(key) {
            Some(QueryState::Ready(data)) => Some(data),
            _ => None,
        }
    }

    /// True when the key was never fetched or has been invalidated since.
    pub fn is_stale(&self, key: QueryKey) -> bool { self.entries.get(&key).is_none_or(|e| e.stale) }

    pub fn invalidate(&mut self, key: QueryKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.stale = true;
        }
    }

    /// Marks a fetch as in flight. Data already held stays visible until the
    /// fetch settles.
    pub fn begin(&mut self, key: QueryKey) {
        self.entries
            .entry(key)
            .and_modify(|e| {
                if !matches!(e.state, QueryState::Ready(_)) {
                    e.state = QueryState::Loading;
                }
            })
            .or_insert(Entry { state: QueryState::Loading, stale: true });
    }

    /// Records a fetch outcome. A failure after a previous success keeps the
    /// old data and leaves the entry stale; the error is handed back.
    pub fn settle(&mut self, key: QueryKey, outcome: Result<T, String>) -> Option<String> {
        let entry = self.entries.entry(key).or_insert(Entry { state: QueryState::Loading, stale: true });
        match outcome {
            Ok(data) => {
                entry.state = QueryState::Ready(data);
                entry.stale = false;
                None
            }
            Err(msg) => {
                if !matches!(entry.state, QueryState::Ready(_)) {
                    entry.state = QueryState::Failed(msg.clone());
                }
                entry.stale = true;
                Some(msg)
            }
        }
    }
}
