//! Client side of the todo API: an HTTP backend, a keyed query cache and the
//! list view that reconciles against the server by refetching after every
//! mutation.

pub mod api;
pub mod cache;
pub mod view;

pub use api::{ClientError, TodoApiClient, TodoBackend};
pub use cache::{QueryCache, QueryKey, QueryState};
pub use view::{Screen, TodoCounts, TodoView};
