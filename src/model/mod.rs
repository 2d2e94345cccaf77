use std::result::Result as DefaultResult;

use serde_json::Value as JsnValue;

use crate::error::{AppError, AppErrorCode};

mod dish;
mod order;

pub use dish::DishModel;
pub use order::{OrderLineModel, OrderModel, OrderStatus};

/// next identifier for a collection, one past the highest numeric id
/// currently stored, so it never collides with an id already in use
pub fn next_numeric_id(existing: Vec<String>) -> String {
    let highest = existing
        .iter()
        .filter_map(|i| i.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (highest + 1).to_string()
}

/// a required text field fails when absent or empty, the validated value
/// is handed back so the next stage receives it explicitly
pub fn require_field<'a>(
    resource: &str,
    name: &str,
    value: Option<&'a str>,
) -> DefaultResult<&'a str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _others => Err(AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(format!("{resource} must include a {name}")),
        }),
    }
}

/// variant of the presence check for fields kept as raw JSON values,
/// rejecting null / empty-string / zero / false the way the text variant
/// rejects empty strings
pub fn require_field_jsn<'a>(
    resource: &str,
    name: &str,
    value: Option<&'a JsnValue>,
) -> DefaultResult<&'a JsnValue, AppError> {
    let accepted = value.filter(|v| match v {
        JsnValue::Null => false,
        JsnValue::String(s) => !s.is_empty(),
        JsnValue::Bool(b) => *b,
        JsnValue::Number(n) => n.as_f64() != Some(0.0),
        _others => true,
    });
    accepted.ok_or(AppError {
        code: AppErrorCode::InvalidInput,
        detail: Some(format!("{resource} must include a {name}")),
    })
}

/// a payload may carry its own id, in that case it has to agree with the
/// id addressed through the route
pub fn check_id_matches_route(
    resource: &str,
    body_id: Option<&str>,
    route_id: &str,
) -> DefaultResult<(), AppError> {
    match body_id {
        None => Ok(()),
        Some(b) if b.is_empty() => Ok(()),
        Some(b) if b == route_id => Ok(()),
        Some(b) => Err(AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(format!(
                "{resource} id does not match route id. {resource}: {b}, Route: {route_id}."
            )),
        }),
    }
}
