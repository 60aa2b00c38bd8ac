use serde_json::{Map, Value};

use crate::ApiFail;

/// Default success envelope: `{ "data": <data> }`
///
/// The `data` key is left out when there is no data at all, matching how
/// an absent value serializes.
pub fn default_success_envelope(data: Option<Value>) -> Value {
    let mut envelope = Map::new();
    if let Some(data) = data {
        envelope.insert("data".to_owned(), data);
    }
    Value::Object(envelope)
}

/// Default failure envelope: `{ "code", "data", "message" }`
///
/// Absent fields are omitted rather than written as `null`.
pub fn default_fail_envelope(fail: &ApiFail) -> Value {
    let mut envelope = Map::new();
    if let Some(code) = fail.code() {
        envelope.insert("code".to_owned(), code.into());
    }
    if let Some(data) = fail.data() {
        envelope.insert("data".to_owned(), data.clone());
    }
    if let Some(message) = fail.message() {
        envelope.insert("message".to_owned(), message.into());
    }
    Value::Object(envelope)
}
