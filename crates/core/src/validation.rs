//! Response validation
//!
//! Shape checks for status API bodies and homework records.

use serde_json::Value;

use crate::error::{ResponseError, ResponseResult};
use crate::messages::status_message;
use crate::models::{Homework, StatusResponse};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";
pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Validate a status API body
///
/// The body must be an object holding a `homeworks` array. The list is
/// returned unchanged and may be empty.
pub fn validate_response(body: &Value) -> ResponseResult<StatusResponse> {
    let object = body.as_object().ok_or_else(|| {
        ResponseError::ShapeMismatch(format!("expected an object, got {}", kind(body)))
    })?;

    let homeworks = object
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| ResponseError::MissingKey(HOMEWORKS_KEY.to_string()))?;
    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| {
            ResponseError::ShapeMismatch(format!(
                "`{}` must be a list, got {}",
                HOMEWORKS_KEY,
                kind(homeworks)
            ))
        })?
        .clone();

    let current_date = match object.get(CURRENT_DATE_KEY) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or_else(|| {
            ResponseError::ShapeMismatch(format!(
                "`{}` must be an integer timestamp, got {}",
                CURRENT_DATE_KEY,
                kind(value)
            ))
        })?),
    };

    Ok(StatusResponse {
        homeworks,
        current_date,
    })
}

/// Extract the name and status of a single homework record
pub fn parse_homework(record: &Value) -> ResponseResult<Homework> {
    let object = record.as_object().ok_or_else(|| {
        ResponseError::ShapeMismatch(format!("homework must be an object, got {}", kind(record)))
    })?;

    let (name, status) = match (object.get(HOMEWORK_NAME_KEY), object.get(STATUS_KEY)) {
        (None, None) => {
            return Err(ResponseError::ShapeMismatch(format!(
                "homework has neither `{}` nor `{}`",
                HOMEWORK_NAME_KEY, STATUS_KEY
            )));
        }
        (None, Some(_)) => return Err(ResponseError::MissingKey(HOMEWORK_NAME_KEY.to_string())),
        (Some(_), None) => return Err(ResponseError::MissingKey(STATUS_KEY.to_string())),
        (Some(name), Some(status)) => (
            string_field(HOMEWORK_NAME_KEY, name)?,
            string_field(STATUS_KEY, status)?,
        ),
    };

    Ok(Homework {
        name: name.to_string(),
        status: status.parse()?,
    })
}

/// Parse a homework record and render the notification text for it
pub fn parse_status(record: &Value) -> ResponseResult<String> {
    parse_homework(record).map(|homework| status_message(&homework))
}

fn string_field<'a>(key: &str, value: &'a Value) -> ResponseResult<&'a str> {
    value.as_str().ok_or_else(|| {
        ResponseError::ShapeMismatch(format!("`{}` must be a string, got {}", key, kind(value)))
    })
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
