// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Decoding of `{success, data | error}` envelopes.
//!
//! Decoding fails closed. A body only counts as a success when the status is 2xx, the body is a
//! JSON object, `success` is present and `true`, and `data` decodes into the expected shape.
//! Anything else, including an envelope with no `success` field at all, is a protocol error.

use crate::errors::{ApiError, Operation};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

fn parse_object(operation: Operation, status: u16, body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::protocol(
            operation,
            Some(status),
            "response body is not a JSON object",
        )),
        Err(e) => Err(ApiError::protocol(
            operation,
            Some(status),
            format!("response body is not JSON: {e}"),
        )),
    }
}

fn error_message(map: &Map<String, Value>) -> Option<String> {
    match map.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// A non-2xx answer. Surfaces the service's own `error` message when the body carries one.
fn status_failure(operation: Operation, status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.as_object().and_then(error_message))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    ApiError::protocol(operation, Some(status), message)
}

/// Check the envelope and hand back the raw `data` payload.
pub fn decode_envelope_value(operation: Operation, status: u16, body: &[u8]) -> Result<Value, ApiError> {
    if !is_success_status(status) {
        return Err(status_failure(operation, status, body));
    }

    let mut map = parse_object(operation, status, body)?;
    match map.get("success") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            let message = error_message(&map).unwrap_or_else(|| "unknown error".to_string());
            return Err(ApiError::protocol(operation, Some(status), message));
        }
        Some(_) => {
            return Err(ApiError::protocol(
                operation,
                Some(status),
                "envelope `success` is not a boolean",
            ));
        }
        None => {
            return Err(ApiError::protocol(
                operation,
                Some(status),
                "envelope missing `success`",
            ));
        }
    }

    match map.remove("data") {
        None | Some(Value::Null) => Err(ApiError::protocol(
            operation,
            Some(status),
            "envelope missing `data`",
        )),
        Some(data) => Ok(data),
    }
}

/// Check the envelope and decode `data` as `T`.
pub fn decode_envelope<T: DeserializeOwned>(
    operation: Operation,
    status: u16,
    body: &[u8],
) -> Result<T, ApiError> {
    let data = decode_envelope_value(operation, status, body)?;
    serde_json::from_value(data).map_err(|e| {
        ApiError::protocol(operation, Some(status), format!("unexpected `data` shape: {e}"))
    })
}

/// Decode an operational endpoint's body. These are normally served bare, but an enveloped body
/// is unwrapped under the same rules as [`decode_envelope`].
pub fn decode_bare<T: DeserializeOwned>(
    operation: Operation,
    status: u16,
    body: &[u8],
) -> Result<T, ApiError> {
    if !is_success_status(status) {
        return Err(status_failure(operation, status, body));
    }
    let map = parse_object(operation, status, body)?;
    if map.contains_key("success") && map.contains_key("data") {
        return decode_envelope(operation, status, body);
    }
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        ApiError::protocol(operation, Some(status), format!("unexpected body shape: {e}"))
    })
}
