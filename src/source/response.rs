use crate::core::value::Value;
use crate::source::transport::FetchError;

/// Decodes a fetch body into a list of payloads.
///
/// The body is a JSON array, or a JSON string whose content is itself a
/// JSON-encoded array.
pub fn parse_body(body: &str) -> Result<Vec<Value>, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let decoded: serde_json::Value = serde_json::from_str(trimmed)?;
    let decoded = match decoded {
        serde_json::Value::String(inner) => serde_json::from_str(inner.as_str())?,
        other => other,
    };

    match decoded {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(Value::from).collect()),
        other => Err(FetchError::NotAList {
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
