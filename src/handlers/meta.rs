use axum::Json;

use crate::types::todo::{DocsResponse, RootResponse, RouteDoc};

pub const API_TITLE: &str = "Todo API";
pub const API_VERSION: &str = "1.0";

const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/", "Health check"),
    ("GET", "/docs", "List the available routes"),
    ("GET", "/todos", "List todos, filtered by q and paged by skip/limit"),
    ("POST", "/todos", "Create a todo"),
    ("PUT", "/todos/{todo_id}", "Update a todo"),
    ("DELETE", "/todos/{todo_id}", "Delete a todo"),
];

/// GET / -> liveness message.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Todo API is running!".to_string(),
        docs_url: "/docs".to_string(),
    })
}

/// GET /docs -> static route index.
pub async fn docs() -> Json<DocsResponse> {
    let routes = ROUTES
        .iter()
        .map(|(method, path, summary)| RouteDoc {
            method: method.to_string(),
            path: path.to_string(),
            summary: summary.to_string(),
        })
        .collect();
    Json(DocsResponse {
        title: API_TITLE.to_string(),
        version: API_VERSION.to_string(),
        routes,
    })
}
