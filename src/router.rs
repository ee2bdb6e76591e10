use axum::{
    Router,
    routing::{get, put},
};

use crate::db::Database;
use crate::handlers::{meta, todos};

/// Shared router state: only the recipe for opening connections.
#[derive(Clone)]
pub struct TodoState {
    pub db: Database,
}

impl TodoState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub fn todo_router(state: TodoState) -> Router {
    Router::new()
        .route("/", get(meta::root))
        .route("/docs", get(meta::docs))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{todo_id}",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .with_state(state)
}
