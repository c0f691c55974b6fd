//! Outgoing request model.
//!
//! An [`ApiRequest`] is what interceptors see and mutate before a
//! [`crate::Transport`] puts it on the wire. Paths are relative to the
//! configured API base URL (which ends in `/api`).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::identifiers::RequestId;

/// Header carrying the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Media type of every non-multipart request.
pub const APPLICATION_JSON: &str = "application/json";

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document; its keys are converted to snake_case before sending.
    Json(Value),
    /// A multipart form; field names are sent exactly as given.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns `true` for multipart payloads.
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// One field of a [`MultipartForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    /// Field name, case-sensitive.
    pub name: String,
    /// Field content.
    pub value: PartValue,
}

/// Content of a multipart field.
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    /// A plain text field.
    Text(String),
    /// An uploaded file.
    File {
        /// File name reported to the server.
        file_name: String,
        /// Media type of the file, if known.
        content_type: Option<String>,
        /// Raw file content.
        bytes: Vec<u8>,
    },
}

/// A binary/multipart form payload, e.g. an attachment upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Appends a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                content_type,
                bytes,
            },
        });
        self
    }

    /// Fields in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A request to the API, before interceptors and transport run.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Correlates log events for this request.
    pub id: RequestId,
    pub method: Method,
    /// Path below the API base URL, e.g. `/users/profile`.
    pub path: String,
    /// Query parameters; keys are converted to snake_case before sending.
    pub query: Map<String, Value>,
    pub body: RequestBody,
    /// Header values keyed by name. Use [`ApiRequest::set_header`] to keep
    /// names unique regardless of case.
    pub headers: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Creates a bodiless request with the default JSON content type.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        Self {
            id: RequestId::new_random(),
            method,
            path: path.into(),
            query: Map::new(),
            body: RequestBody::Empty,
            headers,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_json(body)
    }

    /// Replaces the body with a JSON document.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self.set_header(CONTENT_TYPE, APPLICATION_JSON);
        self
    }

    /// Replaces the body with a multipart form.
    ///
    /// Drops the JSON content type so the transport can set the multipart
    /// boundary itself.
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self.remove_header(CONTENT_TYPE);
        self
    }

    /// Adds one query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.query.insert(key.into(), value);
        self
    }

    /// Replaces all query parameters.
    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Sets a header, replacing any existing header with the same name in any case.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.remove_header(name);
        self.headers.insert(name.to_string(), value.into());
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn remove_header(&mut self, name: &str) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    }
}
