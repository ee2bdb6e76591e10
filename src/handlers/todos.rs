use axum::Json;
use tracing::info;

use crate::error::TodoError;
use crate::middleware::{DbConn, ListQuery, TodoBody, TodoId};
use crate::types::todo::{TodoActionResponse, TodoListResponse};

/// GET /todos?q=&skip=&limit= -> one page of matching items.
pub async fn list_todos(
    ListQuery(params): ListQuery,
    mut conn: DbConn,
) -> Result<Json<TodoListResponse>, TodoError> {
    let result = conn
        .store()
        .list(&params.q, params.skip, params.limit)
        .await;
    conn.close().await;
    let (todos, count) = result?;

    info!(q = %params.q, skip = params.skip, limit = params.limit, count, "listed todos");
    Ok(Json(TodoListResponse { todos, count }))
}

/// POST /todos -> inserts one item and returns its id.
pub async fn create_todo(
    mut conn: DbConn,
    TodoBody(payload): TodoBody,
) -> Result<Json<TodoActionResponse>, TodoError> {
    let result = conn
        .store()
        .create(&payload.title, payload.completed)
        .await;
    conn.close().await;
    let todo_id = result?;

    info!(todo_id, "created todo");
    Ok(Json(TodoActionResponse::new(
        "Todo created successfully!",
        todo_id,
    )))
}

/// PUT /todos/{todo_id} -> overwrites title and completed.
pub async fn update_todo(
    TodoId(todo_id): TodoId,
    mut conn: DbConn,
    TodoBody(payload): TodoBody,
) -> Result<Json<TodoActionResponse>, TodoError> {
    let result = conn
        .store()
        .update(todo_id, &payload.title, payload.completed)
        .await;
    conn.close().await;
    result?;

    info!(todo_id, "updated todo");
    Ok(Json(TodoActionResponse::new(
        "Todo updated successfully!",
        todo_id,
    )))
}

/// DELETE /todos/{todo_id} -> removes the item permanently.
pub async fn delete_todo(
    TodoId(todo_id): TodoId,
    mut conn: DbConn,
) -> Result<Json<TodoActionResponse>, TodoError> {
    let result = conn.store().delete(todo_id).await;
    conn.close().await;
    result?;

    info!(todo_id, "deleted todo");
    Ok(Json(TodoActionResponse::new(
        "Todo deleted successfully!",
        todo_id,
    )))
}
