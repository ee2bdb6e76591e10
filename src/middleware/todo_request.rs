use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::{header::CONTENT_TYPE, request::Parts};
use serde_json::Value;

use crate::error::TodoError;
use crate::types::todo::{ListParams, TodoPayload};

/// `{todo_id}` path segment, parsed as an integer.
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = TodoError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                TodoError::invalid(&["path", "todo_id"], rejection.body_text(), "int_parsing")
            })?;
        Ok(Self(id))
    }
}

/// Query string of the list endpoint; missing keys take their defaults.
#[derive(Debug, Clone)]
pub struct ListQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = TodoError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                TodoError::invalid(&["query"], rejection.body_text(), "query_invalid")
            })?;
        Ok(Self(params))
    }
}

/// JSON body of create and update, shape-checked into a `TodoPayload`.
#[derive(Debug, Clone)]
pub struct TodoBody(pub TodoPayload);

impl<S> FromRequest<S> for TodoBody
where
    S: Send + Sync,
{
    type Rejection = TodoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // a body sent without any content type is still read as JSON
        let body = if req.headers().contains_key(CONTENT_TYPE) {
            let Json(body) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    TodoError::invalid(&["body"], rejection.body_text(), "json_invalid")
                })?;
            body
        } else {
            let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
                TodoError::invalid(&["body"], rejection.body_text(), "json_invalid")
            })?;
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| TodoError::invalid(&["body"], e.to_string(), "json_invalid"))?
        };
        Ok(Self(TodoPayload::from_value(body)?))
    }
}
