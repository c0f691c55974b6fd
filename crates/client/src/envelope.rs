//! The response envelope every API call resolves to.
//!
//! The server wraps every payload as
//! `{success, message, error_code, data, meta}`. The client guarantees an
//! [`Envelope`] for every request, whatever happened on the wire:
//!
//! | Outcome | Constructor | Defaults |
//! |---------|-------------|----------|
//! | 2xx response | [`Envelope::from_success`] | `true`, `"OK"`, `0` |
//! | non-2xx response | [`Envelope::from_failure`] | `false`, `"Request failed"`, HTTP status |
//! | no response | [`Envelope::network_error`] | `false`, `"Network error"`, `-1` |
//!
//! Fields the server sent win over defaults; a field holding the wrong JSON type
//! counts as absent. `data` and `meta` default to `{}` and their keys are
//! converted to camelCase. Top-level keys outside the envelope (such as the
//! `errors` map of validation failures) are kept verbatim in
//! [`Envelope::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::KeyCase;

/// Message used when a 2xx response omits one.
pub const MESSAGE_OK: &str = "OK";
/// Message used when a non-2xx response omits one.
pub const MESSAGE_REQUEST_FAILED: &str = "Request failed";
/// Message of the envelope produced when no response was received.
pub const MESSAGE_NETWORK_ERROR: &str = "Network error";
/// `error_code` used when no HTTP status is available.
pub const ERROR_CODE_UNAVAILABLE: i64 = -1;

/// The standard API response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the server considers the operation successful.
    pub success: bool,

    /// Human-readable outcome message.
    pub message: String,

    /// Application error code; `0` on success, usually the HTTP status on failure.
    pub error_code: i64,

    /// Operation payload with camelCase keys.
    pub data: Value,

    /// Pagination and other metadata with camelCase keys.
    pub meta: Value,

    /// Any other top-level keys, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

struct Defaults {
    success: bool,
    message: &'static str,
    error_code: i64,
}

impl Envelope {
    /// The envelope substituted when a 2xx response carried no usable body.
    pub fn ok() -> Self {
        Self::normalize(Map::new(), Self::success_defaults())
    }

    /// The envelope returned when the request produced no response at all.
    pub fn network_error() -> Self {
        Self::normalize(
            Map::new(),
            Defaults {
                success: false,
                message: MESSAGE_NETWORK_ERROR,
                error_code: ERROR_CODE_UNAVAILABLE,
            },
        )
    }

    /// Normalizes the body of a 2xx response.
    ///
    /// A body that is missing or not a JSON object yields [`Envelope::ok`].
    pub fn from_success(body: Option<Value>) -> Self {
        match body {
            Some(Value::Object(fields)) => Self::normalize(fields, Self::success_defaults()),
            _ => Self::ok(),
        }
    }

    /// Normalizes the body of a non-2xx response with HTTP `status`.
    ///
    /// `status` 0 means the status is unavailable and maps to `-1`.
    pub fn from_failure(status: u16, body: Option<Value>) -> Self {
        let fields = match body {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        let error_code = if status == 0 {
            ERROR_CODE_UNAVAILABLE
        } else {
            i64::from(status)
        };
        Self::normalize(
            fields,
            Defaults {
                success: false,
                message: MESSAGE_REQUEST_FAILED,
                error_code,
            },
        )
    }

    /// Looks up a top-level key of `data`.
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn success_defaults() -> Defaults {
        Defaults {
            success: true,
            message: MESSAGE_OK,
            error_code: 0,
        }
    }

    fn normalize(mut fields: Map<String, Value>, defaults: Defaults) -> Self {
        let success = fields
            .remove("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.success);
        let message = match fields.remove("message") {
            Some(Value::String(message)) => message,
            _ => defaults.message.to_string(),
        };
        let error_code = fields
            .remove("error_code")
            .and_then(|v| v.as_i64())
            .unwrap_or(defaults.error_code);
        let data = payload(fields.remove("data"));
        let meta = payload(fields.remove("meta"));

        Self {
            success,
            message,
            error_code,
            data,
            meta,
            extra: fields,
        }
    }
}

fn payload(value: Option<Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => KeyCase::Camel.convert(value),
    }
}
