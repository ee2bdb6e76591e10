use crate::db::models::TodoItem;
use crate::db::schema::SQLITE_INIT;
use crate::error::TodoError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::str::FromStr;
use tracing::debug;

/// Connection factory for the to-do database.
///
/// Holds only the connect options; every caller opens its own connection and
/// owns it until it is closed or dropped. Nothing is pooled or shared.
#[derive(Clone, Debug)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self, TodoError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Ok(Self { options })
    }

    /// Open a fresh connection.
    pub async fn connect(&self) -> Result<SqliteConnection, TodoError> {
        let conn = SqliteConnection::connect_with(&self.options).await?;
        debug!("opened sqlite connection");
        Ok(conn)
    }

    /// Create the schema if absent, on a connection scoped to this call.
    pub async fn init_schema(&self) -> Result<(), TodoError> {
        let mut conn = self.connect().await?;
        TodoStore::new(&mut conn).init_schema().await?;
        conn.close().await?;
        Ok(())
    }
}

/// Statements against the `todos` table, run on a borrowed connection.
pub struct TodoStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TodoStore<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&mut self) -> Result<(), TodoError> {
        // sqlx::query runs a single statement, so split the script
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *self.conn).await?;
        }
        Ok(())
    }

    /// Rows whose title contains `q`, in storage order, after skipping `skip`
    /// rows and returning at most `limit`. The count is the page length.
    ///
    /// SQLite treats a negative `limit` as unlimited and a negative `skip` as 0.
    pub async fn list(
        &mut self,
        q: &str,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<TodoItem>, usize), TodoError> {
        let todos: Vec<TodoItem> = sqlx::query_as(
            "SELECT id, title, completed FROM todos WHERE title LIKE ? LIMIT ? OFFSET ?",
        )
        .bind(format!("%{q}%"))
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *self.conn)
        .await?;
        let count = todos.len();
        Ok((todos, count))
    }

    /// Insert one row. Returns the id assigned by SQLite.
    pub async fn create(&mut self, title: &str, completed: bool) -> Result<i64, TodoError> {
        let id = sqlx::query("INSERT INTO todos (title, completed) VALUES (?, ?)")
            .bind(title)
            .bind(completed)
            .execute(&mut *self.conn)
            .await?
            .last_insert_rowid();
        Ok(id)
    }

    pub async fn exists(&mut self, id: i64) -> Result<bool, TodoError> {
        let row = sqlx::query("SELECT id FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.is_some())
    }

    /// Overwrite title and completed of an existing row.
    ///
    /// The existence check and the write are separate statements; a delete
    /// landing between them makes the update a silent no-op.
    pub async fn update(&mut self, id: i64, title: &str, completed: bool) -> Result<(), TodoError> {
        if !self.exists(id).await? {
            return Err(TodoError::NotFound);
        }
        sqlx::query("UPDATE todos SET title = ?, completed = ? WHERE id = ?")
            .bind(title)
            .bind(completed)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), TodoError> {
        if !self.exists(id).await? {
            return Err(TodoError::NotFound);
        }
        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn fresh_db() -> (TempDir, Database) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let url = format!("sqlite:{}", dir.path().join("todo.db").display());
        let db = Database::new(&url).expect("invalid database url");
        db.init_schema().await.expect("schema init failed");
        (dir, db)
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let (_dir, db) = fresh_db().await;
        db.init_schema().await.expect("second init failed");
        let mut conn = db.connect().await.unwrap();
        let (rows, count) = TodoStore::new(&mut conn).list("", 0, 100).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let (_dir, db) = fresh_db().await;
        let mut conn = db.connect().await.unwrap();
        let mut store = TodoStore::new(&mut conn);

        let a = store.create("a", false).await.unwrap();
        let b = store.create("b", false).await.unwrap();
        assert!(b > a);

        store.delete(b).await.unwrap();
        let c = store.create("c", false).await.unwrap();
        assert!(c > b);
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let (_dir, db) = fresh_db().await;
        let mut conn = db.connect().await.unwrap();
        let mut store = TodoStore::new(&mut conn);
        for title in ["Buy milk", "Call mom", "Buy bread", "Milk the cow"] {
            store.create(title, false).await.unwrap();
        }

        let (all, count) = store.list("", 0, 100).await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(all[0].title, "Buy milk");

        let (buys, _) = store.list("Buy", 0, 100).await.unwrap();
        let titles: Vec<_> = buys.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Buy bread"]);

        let (page, count) = store.list("", 1, 2).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(page[0].title, "Call mom");
        assert_eq!(page[1].title, "Buy bread");

        let (empty, count) = store.list("", 0, 0).await.unwrap();
        assert!(empty.is_empty());
        assert_eq!(count, 0);

        let (unbounded, count) = store.list("", -5, -1).await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(unbounded, all);
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_are_not_found() {
        let (_dir, db) = fresh_db().await;
        let mut conn = db.connect().await.unwrap();
        let mut store = TodoStore::new(&mut conn);
        store.create("keep", false).await.unwrap();

        assert!(matches!(
            store.update(9999, "x", true).await,
            Err(TodoError::NotFound)
        ));
        assert!(matches!(store.delete(9999).await, Err(TodoError::NotFound)));

        let (rows, _) = store.list("", 0, 100).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "keep");
        assert!(!rows[0].completed);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let (_dir, db) = fresh_db().await;
        let mut conn = db.connect().await.unwrap();
        let mut store = TodoStore::new(&mut conn);
        let id = store.create("draft", false).await.unwrap();

        store.update(id, "final", true).await.unwrap();

        let (rows, _) = store.list("", 0, 100).await.unwrap();
        assert_eq!(
            rows,
            vec![TodoItem {
                id,
                title: "final".to_string(),
                completed: true
            }]
        );
    }
}
