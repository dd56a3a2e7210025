//! Convert serde_json::Value to the text form bound as a query parameter.
//! The builder adds an explicit `::type` cast for each placeholder, so PostgreSQL
//! parses the text into the column type.

use serde_json::Value;

pub fn bind_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_and_documents() {
        assert_eq!(bind_text(&Value::Null), None);
        assert_eq!(bind_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(bind_text(&json!(2025)).as_deref(), Some("2025"));
        assert_eq!(bind_text(&json!("1º Ano")).as_deref(), Some("1º Ano"));
        assert_eq!(bind_text(&json!({"Português": 1})).as_deref(), Some("{\"Português\":1}"));
        assert_eq!(bind_text(&json!([])).as_deref(), Some("[]"));
    }
}
