//! Server-rendered page props.
//!
//! Pages embed their initial state as a snake_case JSON document. Components
//! read it with camelCase keys, like every API payload.

use serde_json::Value;

use crate::keys::KeyCase;

/// Converts embedded page props to camelCase keys. A missing document yields `{}`.
pub fn parse_props(props: Option<Value>) -> Value {
    match props {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(props) => KeyCase::Camel.convert(props),
    }
}
