#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{error::TodoError, todo::{CreateTodo, TodoId, UpdateTodo}};
    use crate::infrastructure::memory_store::TodoStore;

    fn service() -> TodoServiceImpl<TodoStore> { TodoServiceImpl::new(TodoStore::new()) }

    #[tokio::test]
    async fn unit_create_and_get() {
        let service = service();
        let created = service.create(CreateTodo::titled("X")).await.unwrap();
        assert_eq!(created.title, "X");
        let got = service.get(created.id).await.unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn unit_toggle_then_list_reflects_change() {
        let service = service();
        let created = service.create(CreateTodo::titled("Walk")).await.unwrap();
        service.toggle(created.id).await.unwrap();
        let items = service.list().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].completed);
    }

    #[tokio::test]
    async fn unit_errors_pass_through_untouched() {
        let service = service();
        assert_eq!(service.toggle(TodoId(1)).await, Err(TodoError::NotFound(TodoId(1))));
        assert!(matches!(service.create(CreateTodo::titled(" ")).await, Err(TodoError::Validation(_))));
        let created = service.create(CreateTodo::titled("a")).await.unwrap();
        let err = service.update(created.id, UpdateTodo { title: Some(String::new()), completed: None }).await;
        assert!(matches!(err, Err(TodoError::Validation(_))));
    }

    #[tokio::test]
    async fn unit_fresh_services_do_not_share_state() {
        let first = service();
        first.create(CreateTodo::titled("only here")).await.unwrap();
        let second = service();
        assert!(second.list().await.is_empty());
        assert_eq!(second.create(CreateTodo::titled("b")).await.unwrap().id, TodoId(1));
    }

    #[tokio::test]
    async fn unit_remove_returns_removed_item() {
        let service = service();
        let created = service.create(CreateTodo::titled("bye")).await.unwrap();
        assert_eq!(service.remove(created.id).await.unwrap(), created);
        assert!(service.list().await.is_empty());
    }
}
