//! Interpretation of the model's resume-parse reply.
//!
//! The profile stores every field as free text, so whatever structure the model returns
//! (objects, arrays, numbers) is flattened into a readable text block here. The original
//! structured reply is kept alongside for storage.

use serde_json::Value;

use crate::llm_client::strip_json_fences;
use crate::models::profile::ProfileFields;

/// Length of the raw-reply prefix kept as `summary` when the reply is not usable JSON.
pub const FALLBACK_SUMMARY_CHARS: usize = 500;

/// Scalar lists whose items are all at most this long are joined inline ("Rust, Go").
const INLINE_ITEM_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeParse {
    pub fields: ProfileFields,
    /// The reply as parsed JSON. `None` when the fallback was used.
    pub structured: Option<Value>,
    pub used_fallback: bool,
}

pub fn interpret_resume_reply(reply: &str) -> ResumeParse {
    match serde_json::from_str::<Value>(strip_json_fences(reply)) {
        Ok(Value::Object(map)) => {
            let field = |key: &str| map.get(key).map(flatten_value).unwrap_or_default();
            let fields = ProfileFields {
                name: field("name"),
                email: field("email"),
                phone: field("phone"),
                summary: field("summary"),
                experience: field("experience"),
                education: field("education"),
                skills: field("skills"),
                projects: field("projects"),
                certifications: field("certifications"),
            };
            ResumeParse {
                fields,
                structured: Some(Value::Object(map)),
                used_fallback: false,
            }
        }
        _ => fallback_parse(reply),
    }
}

fn fallback_parse(reply: &str) -> ResumeParse {
    ResumeParse {
        fields: ProfileFields {
            summary: reply.chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            ..Default::default()
        },
        structured: None,
        used_fallback: true,
    }
}

/// Renders any JSON value as plain text.
pub fn flatten_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => flatten_array(items),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, v)| {
                let text = flatten_value(v);
                if text.is_empty() {
                    None
                } else if text.contains('\n') {
                    Some(format!("{}:\n{}", humanize_key(key), text))
                } else {
                    Some(format!("{}: {}", humanize_key(key), text))
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn flatten_array(items: &[Value]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(flatten_value)
        .filter(|s| !s.is_empty())
        .collect();

    let all_scalar = items.iter().all(|v| !v.is_object() && !v.is_array());
    if !all_scalar {
        return parts.join("\n\n");
    }

    let inline = parts
        .iter()
        .all(|p| p.chars().count() <= INLINE_ITEM_MAX_CHARS && !p.contains('\n'));
    if inline {
        parts.join(", ")
    } else {
        parts
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `start_date` -> `Start date`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
