pub mod db_conn;
pub mod todo_request;

pub use db_conn::DbConn;
pub use todo_request::{ListQuery, TodoBody, TodoId};
