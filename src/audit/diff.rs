//! Change summaries for audit entries

use serde_json::Value;

/// Summarise top-level field changes between two JSON objects.
///
/// Returns `None` when nothing changed. Non-object values are compared whole.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(b), Value::Object(a)) => {
            let mut changes: Vec<String> = b
                .iter()
                .filter_map(|(key, old)| match a.get(key) {
                    Some(new) if new == old => None,
                    Some(new) => Some(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old),
                        format_value(new)
                    )),
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
                })
                .collect();
            changes.extend(
                a.iter()
                    .filter(|(key, _)| !b.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_edit_diff() {
        let before = json!({"price": 10000, "quantity": 1, "total": 10000, "notes": "Bensin"});
        let after = json!({"price": 12000, "quantity": 2, "total": 24000, "notes": "Bensin"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("price: 10000 -> 12000"));
        assert!(diff.contains("quantity: 1 -> 2"));
        assert!(diff.contains("total: 10000 -> 24000"));
        assert!(!diff.contains("notes"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"price": 5000});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_added_and_removed_fields() {
        let diff = generate_diff(&json!({"notes": "a"}), &json!({"total": 1})).unwrap();
        assert!(diff.contains("notes: \"a\" -> (removed)"));
        assert!(diff.contains("total: (added) -> 1"));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(100);
        let diff = generate_diff(&json!({"notes": ""}), &json!({"notes": long})).unwrap();
        assert!(diff.contains("...\""));
        assert!(diff.len() < 80);
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)),
            Some("1 -> 2".to_string())
        );
    }
}
