use todos::application::todo_service::TodoServiceImpl;
use todos::client::{ClientError, Screen, TodoApiClient, TodoBackend, TodoCounts, TodoView};
use todos::domain::todo::{TodoId, UpdateTodo};
use todos::http::routing::{self, todos as todo_routes};
use todos::infrastructure::memory_store::TodoStore;

/// Serves a fresh store on an ephemeral port and returns its base URL.
async fn spawn_server() -> String {
    let service = TodoServiceImpl::new(TodoStore::new());
    let router = routing::app(todo_routes::router(todo_routes::AppState { service }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn client_round_trip_over_http() {
    let client = TodoApiClient::new(&spawn_server().await);
    assert!(client.list().await.unwrap().is_empty());

    let created = client.create("Buy milk").await.unwrap();
    assert!(!created.completed);

    let toggled = client.toggle(created.id).await.unwrap();
    assert!(toggled.completed);

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![toggled.clone()]);

    let updated = client.update(created.id, &UpdateTodo { title: Some("Buy oat milk".into()), completed: None }).await.unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert!(updated.completed);

    let removed = client.remove(created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_maps_error_statuses() {
    let client = TodoApiClient::new(&spawn_server().await);

    match client.create("  ").await {
        Err(ClientError::Rejected { status: 400, message }) => assert_eq!(message, "Title is required"),
        other => panic!("unexpected {other:?}"),
    }
    match client.remove(TodoId(9999)).await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Todo not found"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn client_reports_unreachable_server_as_transport_error() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut view = TodoView::new(TodoApiClient::new(&format!("http://{addr}")));
    assert!(matches!(view.backend().list().await, Err(ClientError::Transport(_))));
    view.mount().await;
    assert!(matches!(view.screen(), Screen::Error(_)));
}

#[tokio::test]
async fn view_end_to_end_scenario() {
    let mut view = TodoView::new(TodoApiClient::new(&spawn_server().await));
    assert_eq!(view.screen(), Screen::Loading);
    view.mount().await;
    assert_eq!(view.screen(), Screen::Empty);

    let milk = view.create("Buy milk").await.unwrap();
    view.create("Walk dog").await.unwrap();
    view.create("Write tests").await.unwrap();
    view.toggle(milk.id).await.unwrap();
    assert_eq!(view.counts(), TodoCounts { left: 2, completed: 1 });

    view.remove(milk.id).await.unwrap();
    match view.screen() {
        Screen::List { items, counts } => {
            let titles: Vec<&str> = items.iter().map(|t| t.title.as_str()).collect();
            assert_eq!(titles, vec!["Walk dog", "Write tests"]);
            assert_eq!(counts, TodoCounts { left: 2, completed: 0 });
        }
        other => panic!("unexpected screen {other:?}"),
    }

    // a stale delete fails without disturbing the list
    assert!(view.remove(milk.id).await.is_err());
    assert_eq!(view.items().len(), 2);
    assert_eq!(view.notice(), Some("Todo not found"));
}

#[tokio::test]
async fn two_views_converge_on_server_state() {
    let url = spawn_server().await;
    let mut first = TodoView::new(TodoApiClient::new(&url));
    let mut second = TodoView::new(TodoApiClient::new(&url));
    first.mount().await;
    second.mount().await;

    let shared = first.create("shared").await.unwrap();
    second.toggle(shared.id).await.unwrap();
    assert_eq!(second.counts(), TodoCounts { left: 0, completed: 1 });

    // first still holds its last snapshot until it refetches
    assert_eq!(first.counts(), TodoCounts { left: 1, completed: 0 });
    first.invalidate();
    first.refresh().await;
    assert_eq!(first.counts(), TodoCounts { left: 0, completed: 1 });
}
