use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Plain-text form of a JSON scalar: strings unquoted, everything else as JSON.
pub fn value_to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(v) => Cow::Borrowed(v),
        other => Cow::Owned(other.to_string()),
    }
}

/// JSON truthiness: null, false, zero and empty strings/containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(v) => *v,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        let parsed: Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn strings_print_unquoted() {
        assert_eq!(value_to_text(&json!("Drama")), "Drama");
        assert_eq!(value_to_text(&json!(2000)), "2000");
        assert_eq!(value_to_text(&json!(1.5)), "1.5");
        assert_eq!(value_to_text(&json!(["a"])), r#"["a"]"#);
    }

    #[test]
    fn truthiness_follows_json_emptiness() {
        let falsy_values = [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ];
        for falsy in falsy_values {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        let truthy_values = [
            json!(true),
            json!(1900),
            json!(-1),
            json!("x"),
            json!([0]),
            json!({"a": null}),
        ];
        for truthy in truthy_values {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
