use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::Connection;
use sqlx::sqlite::SqliteConnection;
use tracing::{debug, warn};

use crate::db::TodoStore;
use crate::error::TodoError;
use crate::router::TodoState;

/// One SQLite connection owned by the current request.
///
/// Opened when the handler's arguments are extracted. `close` releases it
/// explicitly; any early return drops it, which releases it as well.
pub struct DbConn(SqliteConnection);

impl DbConn {
    pub fn store(&mut self) -> TodoStore<'_> {
        TodoStore::new(&mut self.0)
    }

    /// Close the connection. A failure here cannot undo committed work, so it
    /// is only logged.
    pub async fn close(self) {
        match self.0.close().await {
            Ok(()) => debug!("closed sqlite connection"),
            Err(e) => warn!(error = %e, "failed to close sqlite connection"),
        }
    }
}

impl FromRequestParts<TodoState> for DbConn {
    type Rejection = TodoError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &TodoState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.db.connect().await?;
        Ok(Self(conn))
    }
}
