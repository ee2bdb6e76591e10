use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}
