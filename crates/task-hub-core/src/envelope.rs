//! Response Envelope
//!
//! The backend wraps payloads as `{status, message, data}`. Some endpoints
//! answer with `{status, ...}` only, and a few return the payload bare.
//! Decoding picks exactly one of these shapes.

use serde_json::Value;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Object carrying a `data` field; holds the field's value.
    Data(Value),
    /// Object with a truthy `status` but no `data`; holds the whole body.
    StatusOnly(Value),
    /// Anything else; holds the whole body.
    Unwrapped(Value),
}

impl Envelope {
    pub fn decode(body: Value) -> Self {
        match body {
            Value::Object(mut map) => {
                if let Some(data) = map.remove("data") {
                    return Envelope::Data(data);
                }
                let body = Value::Object(map);
                if is_truthy(body.get("status")) {
                    Envelope::StatusOnly(body)
                } else {
                    Envelope::Unwrapped(body)
                }
            }
            other => Envelope::Unwrapped(other),
        }
    }

    /// The value call sites care about.
    pub fn into_payload(self) -> Value {
        match self {
            Envelope::Data(value) | Envelope::StatusOnly(value) | Envelope::Unwrapped(value) => value,
        }
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(_) => true,
    }
}

/// Decode and unwrap in one step.
pub fn unwrap_body(body: Value) -> Value {
    Envelope::decode(body).into_payload()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_array_is_unwrapped() {
        assert_eq!(unwrap_body(json!({"data": [1, 2, 3]})), json!([1, 2, 3]));
    }

    #[test]
    fn test_data_object_is_unwrapped() {
        let body = json!({"status": "success", "message": "ok", "data": {"id": 7}});
        assert_eq!(Envelope::decode(body), Envelope::Data(json!({"id": 7})));
    }

    #[test]
    fn test_null_data_still_counts_as_data() {
        assert_eq!(Envelope::decode(json!({"data": null})), Envelope::Data(Value::Null));
    }

    #[test]
    fn test_status_only_body_is_kept() {
        let body = json!({"status": "ok"});
        assert_eq!(Envelope::decode(body.clone()), Envelope::StatusOnly(body.clone()));
        assert_eq!(unwrap_body(body.clone()), body);
    }

    #[test]
    fn test_falsy_status_is_plain_body() {
        let body = json!({"status": "", "token": "t"});
        assert_eq!(Envelope::decode(body.clone()), Envelope::Unwrapped(body));
    }

    #[test]
    fn test_bare_values_pass_through() {
        assert_eq!(Envelope::decode(json!([1])), Envelope::Unwrapped(json!([1])));
        assert_eq!(unwrap_body(Value::Null), Value::Null);
    }
}
