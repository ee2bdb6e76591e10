use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::TodoItem;
use crate::error::{FieldError, TodoError};

/// Validated body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoPayload {
    pub title: String,
    pub completed: bool,
}

impl TodoPayload {
    /// Check the raw JSON body field by field, collecting every problem.
    pub fn from_value(body: Value) -> Result<Self, TodoError> {
        let Value::Object(mut obj) = body else {
            return Err(TodoError::invalid(
                &["body"],
                "Input should be a valid dictionary",
                "dict_type",
            ));
        };

        let mut errors = Vec::new();
        let title = take_title(&mut obj, &mut errors);
        let completed = take_completed(&mut obj, &mut errors);

        match (title, completed) {
            (Some(title), Some(completed)) if errors.is_empty() => Ok(Self { title, completed }),
            _ => Err(TodoError::Validation(errors)),
        }
    }
}

fn take_title(obj: &mut Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    match obj.remove("title") {
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.push(FieldError::new(
                &["body", "title"],
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
        None => {
            errors.push(FieldError::new(
                &["body", "title"],
                "Field required",
                "missing",
            ));
            None
        }
    }
}

fn take_completed(obj: &mut Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<bool> {
    match obj.remove("completed") {
        None => Some(false),
        Some(value) => match coerce_bool(&value) {
            Some(b) => Some(b),
            None => {
                errors.push(FieldError::new(
                    &["body", "completed"],
                    "Input should be a valid boolean",
                    "bool_type",
                ));
                None
            }
        },
    }
}

/// JSON booleans, the integers 0/1 and the usual yes/no spellings.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "1" | "on" | "t" | "true" | "y" | "yes" => Some(true),
            "0" | "off" | "f" | "false" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn default_limit() -> i64 {
    100
}

/// Query string of `GET /todos`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<TodoItem>,
    pub count: usize,
}

/// Envelope returned by create, update and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoActionResponse {
    pub message: String,
    pub todo_id: i64,
}

impl TodoActionResponse {
    pub fn new(message: &str, todo_id: i64) -> Self {
        Self {
            message: message.to_string(),
            todo_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub docs_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteDoc {
    pub method: String,
    pub path: String,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocsResponse {
    pub title: String,
    pub version: String,
    pub routes: Vec<RouteDoc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_errors(err: TodoError) -> Vec<FieldError> {
        match err {
            TodoError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn completed_defaults_to_false() {
        let payload = TodoPayload::from_value(json!({ "title": "Buy milk" })).unwrap();
        assert_eq!(
            payload,
            TodoPayload {
                title: "Buy milk".to_string(),
                completed: false
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload =
            TodoPayload::from_value(json!({ "title": "x", "completed": true, "id": 5 })).unwrap();
        assert!(payload.completed);
    }

    #[test]
    fn missing_title_is_reported() {
        let errors = field_errors(TodoPayload::from_value(json!({ "completed": true })).unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, vec!["body", "title"]);
        assert_eq!(errors[0].kind, "missing");
    }

    #[test]
    fn every_bad_field_is_reported() {
        let errors =
            field_errors(TodoPayload::from_value(json!({ "title": 42, "completed": "maybe" })).unwrap_err());
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["string_type", "bool_type"]);
    }

    #[test]
    fn completed_accepts_integer_and_string_spellings() {
        for (raw, expected) in [
            (json!(1), true),
            (json!(0), false),
            (json!("true"), true),
            (json!("False"), false),
            (json!("yes"), true),
            (json!("no"), false),
        ] {
            let payload = TodoPayload::from_value(json!({ "title": "a", "completed": raw.clone() })).unwrap();
            assert_eq!(payload.completed, expected, "input {raw}");
        }
    }

    #[test]
    fn completed_rejects_null_and_other_numbers() {
        for raw in [json!(null), json!(2), json!(0.5), json!([true])] {
            let errors = field_errors(
                TodoPayload::from_value(json!({ "title": "a", "completed": raw })).unwrap_err(),
            );
            assert_eq!(errors[0].loc, vec!["body", "completed"]);
            assert_eq!(errors[0].kind, "bool_type");
        }
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = field_errors(TodoPayload::from_value(json!(["title"])).unwrap_err());
        assert_eq!(errors[0].loc, vec!["body"]);
        assert_eq!(errors[0].kind, "dict_type");
    }
}
